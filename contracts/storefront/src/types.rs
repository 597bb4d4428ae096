/*!
 * Type Definitions for the Storefront Smart Contract
 *
 * Data structures stored in contract state, the contract error enum, and the
 * event topic constants used for off-chain indexing.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Env, String, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// A catalog entry.
///
/// Items are created and overwritten only by the operator's `list` call. The
/// id is supplied by the operator, not auto-assigned; listing an existing id
/// replaces the stored entry. `buy` decrements `stock` in place; nothing else
/// mutates a stored item, and items are never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// Operator-assigned identifier. A colliding id silently overwrites the
    /// previous entry.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Catalog category.
    pub category: String,

    /// Image URI.
    pub image: String,

    /// Price in the smallest unit of the payment token. `buy` requires the
    /// attached payment to equal this exactly.
    pub cost: i128,

    /// Star rating as supplied by the operator. No bound is enforced.
    pub rating: u32,

    /// Units remaining. A purchase requires stock > 0 and consumes one unit.
    pub stock: u32,
}

impl Item {
    /// The value returned for an id that was never listed: zeroed numbers and
    /// empty strings. Its zero stock rejects any purchase attempt.
    pub fn vacant(env: &Env) -> Self {
        Item {
            id: 0,
            name: String::from_str(env, ""),
            category: String::from_str(env, ""),
            image: String::from_str(env, ""),
            cost: 0,
            rating: 0,
            stock: 0,
        }
    }
}

/// One completed purchase in a buyer's order history.
///
/// The item is a value snapshot taken at purchase time, with `stock` already
/// reflecting the sale. Relisting the same id later does not change recorded
/// orders.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// Ledger timestamp at purchase.
    pub time: u64,

    /// Snapshot of the catalog entry as of this purchase.
    pub item: Item,
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Contract errors. A returned error aborts the whole invocation and the
/// host reverts its storage writes, so no partial effect is observable.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller is not the operator. Returned by `list` and `withdraw`.
    Unauthorized = 1,

    /// The item has no remaining stock, or the id was never listed.
    OutOfStock = 2,

    /// The payment does not equal the listed cost. Under- and over-payment
    /// are both rejected.
    IncorrectPayment = 3,

    /// The payment token rejected a transfer (buy's inbound pull or
    /// withdraw's outbound drain).
    TransferFailed = 4,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================
// Topics for events published on successful mutations, consumed by off-chain
// indexers. Core correctness does not depend on delivery.

/// Published on a successful `list`.
/// Topics: (LISTED, item id). Data: (cost, stock)
pub const LISTED: Symbol = symbol_short!("listed");

/// Published on a successful `buy`.
/// Topics: (PURCHASE, buyer). Data: (item id, order index)
pub const PURCHASE: Symbol = symbol_short!("purchase");
