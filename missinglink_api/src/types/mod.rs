mod envelope;
pub use self::envelope::{Metadata, ResponseEnvelope};

mod meta;
pub use self::meta::{PaginationMetadata, QueryParameterMetadata};

mod case;
pub use self::case::{CaseID, CaseRecord};
