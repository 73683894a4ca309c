#[derive(Debug, PartialEq, serde::Serialize)]
pub enum ErrorTranslationKey {
    #[serde(rename = "bid.empty-amount")]
    BidEmptyAmount,
    #[serde(rename = "bid.not-above-current")]
    BidNotAboveCurrent,
    #[serde(rename = "comment.empty-text")]
    CommentEmptyText,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub translation_key: ErrorTranslationKey,
}

#[derive(Debug, serde::Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

// Storage keys match the blobs the original practice page wrote, so records
// saved by it keep parsing here.
pub const USER_KEY: &str = "charityAuctionUser";
pub const USERS_LIST_KEY: &str = "charityAuctionUsers";
