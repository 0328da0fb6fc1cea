//! Database-side record models
//!
//! SurrealDB 的记录 id 是保留字段，所以库内记录与线上文档分开：
//! 记录用 RecordId，文档用 UUID 字符串，互转在各 record 类型上。

pub mod reservation;

pub use reservation::ReservationRecord;
