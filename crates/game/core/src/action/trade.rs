//! Moving items between two holders.

use super::ActionError;
use super::inventory::take_out;
use crate::state::{EntityId, ItemPower, Map, StateError};

/// Moves inventory slot `index` of `from` to `to`.
///
/// With `paid`, the receiver pays the item's price to the giver and the
/// move is refused when the receiver cannot afford it. A heart heals the
/// receiver instead of being stored.
fn transfer(
    map: &mut Map,
    from: EntityId,
    to: EntityId,
    index: usize,
    paid: bool,
) -> Result<(), ActionError> {
    let (giver, receiver) = map
        .pair_mut(from, to)
        .ok_or(StateError::EntityNotFound(to))?;
    let (Some(stock), Some(purse)) = (giver.holder.as_ref(), receiver.holder.as_ref()) else {
        return Err(StateError::MissingCapability {
            id: if giver.holder.is_none() { from } else { to },
            capability: "inventory",
        }
        .into());
    };
    let item = stock.inventory.get(index).ok_or(ActionError::InventoryIndex {
        index,
        len: stock.inventory.len(),
    })?;
    let price = item.item.as_ref().map_or(0, |data| data.price);
    let kind = item.kind;
    if paid && purse.hazel < price {
        return Err(ActionError::NotEnoughHazel {
            price,
            hazel: purse.hazel,
        });
    }

    let Some(moved) = take_out(giver, index) else {
        return Ok(());
    };
    if paid {
        if let Some(holder) = giver.holder.as_mut() {
            holder.hazel += price;
        }
        if let Some(holder) = receiver.holder.as_mut() {
            holder.hazel -= price;
        }
    }
    match moved.item.as_ref().map(|data| data.power) {
        Some(ItemPower::Heal { amount }) => {
            if let Some(fighter) = receiver.fighter.as_mut() {
                fighter.heal(amount);
            }
        }
        _ => {
            if let Some(holder) = receiver.holder.as_mut() {
                holder.inventory.push(moved);
            }
        }
    }
    tracing::debug!(
        target: "dungeon::trade",
        %from,
        %to,
        item = kind.as_str(),
        price,
        paid,
        "item transferred"
    );
    Ok(())
}

/// Buys slot `index` of the merchant's stock.
pub fn buy(
    map: &mut Map,
    buyer: EntityId,
    merchant: EntityId,
    index: usize,
) -> Result<(), ActionError> {
    transfer(map, merchant, buyer, index, true)?;
    map.logs.add_message("You bought an item.");
    Ok(())
}

/// Sells slot `index` of the seller's inventory to the merchant.
pub fn sell(
    map: &mut Map,
    seller: EntityId,
    merchant: EntityId,
    index: usize,
) -> Result<(), ActionError> {
    transfer(map, seller, merchant, index, true)?;
    map.logs.add_message("You sold an item.");
    Ok(())
}

pub fn take_from_chest(
    map: &mut Map,
    taker: EntityId,
    chest: EntityId,
    index: usize,
) -> Result<(), ActionError> {
    transfer(map, chest, taker, index, false)
}

pub fn give_to_chest(
    map: &mut Map,
    giver: EntityId,
    chest: EntityId,
    index: usize,
) -> Result<(), ActionError> {
    transfer(map, giver, chest, index, false)
}
