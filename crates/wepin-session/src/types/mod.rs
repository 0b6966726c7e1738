/*
[INPUT]:  Wallet SDK schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions shared by session and SDK seams
[UPDATE]: When SDK schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod rpc;
pub mod snapshot;

pub use enums::*;
pub use models::*;
pub use rpc::*;
pub use snapshot::*;
