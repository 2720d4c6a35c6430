use lampshop_core::{DomainResult, EntityId};
use lampshop_orders::{Order, OrderStatus};

use crate::store::EntityStore;

/// Status patching for any order store.
pub trait OrderStatusPatch {
    /// Overwrite only the status of `id` and refresh its update timestamp.
    ///
    /// Every transition is accepted, including moving "backwards".
    fn patch_status(&self, id: EntityId, status: OrderStatus) -> DomainResult<Order>;
}

impl<S> OrderStatusPatch for S
where
    S: EntityStore<Order> + ?Sized,
{
    fn patch_status(&self, id: EntityId, status: OrderStatus) -> DomainResult<Order> {
        self.modify(id, &mut |order: &mut Order| order.set_status(status))
    }
}
