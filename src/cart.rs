//! Shopping cart state: a list of lines keyed by catalog item id, changed only
//! through [`Cart::apply`].

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

/// Largest quantity a line can hold, so a line can always be cleared with one negative delta.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub item_id: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Cart {
    #[schema(value_type = Vec<CartLine>)]
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: u32) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Returns the cart after adding `delta` (possibly negative) to `item_id`.
    ///
    /// An absent item with a positive delta gets a new line holding `delta`;
    /// a line whose quantity would reach zero or below is dropped.
    pub fn apply(&self, item_id: u32, delta: i32) -> Cart {
        let Some(existing) = self.lines.iter().find(|l| l.item_id == item_id) else {
            if delta <= 0 {
                return self.clone();
            }
            let mut lines = self.lines.clone();
            lines.push(CartLine {
                item_id,
                quantity: delta.unsigned_abs(),
            });
            return Cart { lines };
        };

        let next = i64::from(existing.quantity) + i64::from(delta);
        if next <= 0 {
            return Cart {
                lines: self
                    .lines
                    .iter()
                    .copied()
                    .filter(|l| l.item_id != item_id)
                    .collect(),
            };
        }

        let quantity = u32::try_from(next.min(i64::from(MAX_QUANTITY))).unwrap_or(MAX_QUANTITY);
        Cart {
            lines: self
                .lines
                .iter()
                .map(|l| {
                    if l.item_id == item_id {
                        CartLine { item_id, quantity }
                    } else {
                        *l
                    }
                })
                .collect(),
        }
    }
}

/// Carts of signed-in users, kept in memory for the life of the process.
#[derive(Clone, Default)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: Uuid) -> Cart {
        self.carts
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Applies the reducer to the user's cart and returns the new state.
    pub async fn update(&self, user_id: Uuid, item_id: u32, delta: i32) -> Cart {
        let mut carts = self.carts.write().await;
        let next = carts.get(&user_id).cloned().unwrap_or_default().apply(item_id, delta);
        store(&mut carts, user_id, next)
    }

    /// Drops the item's whole line in one step, or `None` when the cart lacks it.
    pub async fn remove(&self, user_id: Uuid, item_id: u32) -> Option<Cart> {
        let mut carts = self.carts.write().await;
        let current = carts.get(&user_id).cloned().unwrap_or_default();
        let quantity = current.quantity_of(item_id);
        if quantity == 0 {
            return None;
        }
        let next = current.apply(item_id, -i32::try_from(quantity).unwrap_or(i32::MAX));
        Some(store(&mut carts, user_id, next))
    }

    /// Empties the user's cart, handing back what it held.
    pub async fn take(&self, user_id: Uuid) -> Cart {
        self.carts
            .write()
            .await
            .remove(&user_id)
            .unwrap_or_default()
    }
}

fn store(carts: &mut HashMap<Uuid, Cart>, user_id: Uuid, next: Cart) -> Cart {
    if next.is_empty() {
        carts.remove(&user_id);
    } else {
        carts.insert(user_id, next.clone());
    }
    next
}
