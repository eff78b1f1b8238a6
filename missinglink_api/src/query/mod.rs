mod common;
pub use self::common::{Query, SortDirection};

mod paging;
pub use self::paging::{PageLimits, PagingSortSpec};
