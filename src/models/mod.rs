mod record;

pub use record::{
    Diversification, Holding, MessageResponse, Pagination, Record, RecordCountResponse,
    RecordInput, RecordListResponse, RecordResponse, RecordStatistics,
};
