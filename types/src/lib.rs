pub mod api;
pub use api::{
    BalanceResponse, Color, ErrorResponse, Game, HistoryResponse, Outcome, TransactionRecord,
    TransferKind, TransferRequest, WagerRequest, WagerResult,
};
