pub mod item;
pub mod result;
pub mod timestamp;

pub use item::{ClassificationRecord, LiveFeedItem};
pub use result::{
    ClassificationResult, ClassifierResponse, CompostingInfo, DisposalDetails, WasteDetails,
};
