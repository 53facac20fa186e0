//! Outbound ports (driven side - SPI).

mod store;

pub use store::{
    AccountStore, FlagField, MergeBatch, NumericField, Relation, RelationRow, ScalarOp,
    StoreError, StringField,
};
