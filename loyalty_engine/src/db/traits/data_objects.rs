use crate::db_types::Order;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOrderResult {
    Inserted(Order),
    /// The order number was already on record. The existing order is returned, whoever it belongs to.
    AlreadyExists(Order),
}
