/*!
 * Storefront Smart Contract
 *
 * A single-operator storefront: the operator lists items with a price and a
 * stock count, buyers purchase by paying exactly the listed cost in the
 * configured payment token, and the operator withdraws the accumulated
 * proceeds.
 *
 * State held by the contract:
 * - The catalog, keyed by operator-assigned item id
 * - Per-buyer order history, recorded as immutable item snapshots
 * - The custodied balance of payments received and not yet withdrawn
 *
 * The Soroban host supplies identity (require_auth), value transfer (the
 * token interface), and event delivery. Invocations are serialized, and a
 * failed invocation's storage writes are rolled back, so each operation is
 * atomic as written.
 */

#![no_std]

mod types;


use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, Env, Map, String, Symbol,
};

use types::{Error, Item, Order, LISTED, PURCHASE};

#[contract]
pub struct Storefront;

// Storage keys. Configuration fixed at initialization lives in persistent
// storage; the runtime maps and the custodied balance live in instance storage.
const OPERATOR_KEY: Symbol = symbol_short!("OPERATOR"); // Operator address (persistent)
const PAY_TOKEN_KEY: Symbol = symbol_short!("PAY_TOKEN"); // Payment token contract (persistent)
const ITEMS_KEY: Symbol = symbol_short!("ITEMS"); // Map<u64, Item> (instance)
const ORDERS_KEY: Symbol = symbol_short!("ORDERS"); // Map<(Address, u64), Order> (instance)
const ORDER_CNT_KEY: Symbol = symbol_short!("ORDER_CNT"); // Map<Address, u64> (instance)
const BALANCE_KEY: Symbol = symbol_short!("BALANCE"); // Custodied proceeds, i128 (instance)

#[contractimpl]
impl Storefront {
    /// Initializes the storefront with its operator and payment token.
    /// Can only be called once.
    ///
    /// # Arguments
    /// * `operator` - The account allowed to list items and withdraw
    ///   proceeds. Fixed for the contract's lifetime.
    /// * `payment_token` - The token contract purchases are paid in.
    pub fn initialize(env: Env, operator: Address, payment_token: Address) {
        if env.storage().persistent().has(&OPERATOR_KEY) {
            panic!("Contract already initialized");
        }

        env.storage().persistent().set(&OPERATOR_KEY, &operator);
        env.storage().persistent().set(&PAY_TOKEN_KEY, &payment_token);

        env.storage()
            .instance()
            .set(&ITEMS_KEY, &Map::<u64, Item>::new(&env));
        env.storage()
            .instance()
            .set(&ORDERS_KEY, &Map::<(Address, u64), Order>::new(&env));
        env.storage()
            .instance()
            .set(&ORDER_CNT_KEY, &Map::<Address, u64>::new(&env));
        env.storage().instance().set(&BALANCE_KEY, &0i128);
    }

    /// Verifies that `caller` signed the invocation and is the stored
    /// operator.
    fn require_operator(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let operator: Address = env.storage().persistent().get(&OPERATOR_KEY).unwrap();
        if *caller != operator {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Creates or replaces the catalog entry for `id`.
    ///
    /// The fields are stored exactly as supplied: cost, rating, and stock
    /// are not validated here. Purchasability is enforced by `buy`.
    ///
    /// # Arguments
    /// * `caller` - Must be the operator (must sign transaction)
    /// * `id` - Catalog id for the entry; an existing id is overwritten
    /// * `name`, `category`, `image` - Catalog metadata
    /// * `cost` - Price in the smallest unit of the payment token
    /// * `rating` - Star rating
    /// * `stock` - Units available for purchase
    ///
    /// # Errors
    /// - Unauthorized: caller is not the operator
    #[allow(clippy::too_many_arguments)]
    pub fn list(
        env: Env,
        caller: Address,
        id: u64,
        name: String,
        category: String,
        image: String,
        cost: i128,
        rating: u32,
        stock: u32,
    ) -> Result<(), Error> {
        Self::require_operator(&env, &caller)?;

        let mut items: Map<u64, Item> = env.storage().instance().get(&ITEMS_KEY).unwrap();
        items.set(
            id,
            Item {
                id,
                name,
                category,
                image,
                cost,
                rating,
                stock,
            },
        );
        env.storage().instance().set(&ITEMS_KEY, &items);

        env.events().publish((LISTED, id), (cost, stock));

        Ok(())
    }

    /// Purchases one unit of `id`, paying exactly its listed cost.
    ///
    /// Pulls `payment` from the buyer into the contract, decrements the
    /// item's stock, appends an order snapshot to the buyer's history at the
    /// next 1-based index, and adds the payment to the custodied balance.
    ///
    /// # Arguments
    /// * `buyer` - The purchasing account (must sign transaction)
    /// * `id` - Catalog id of the item to purchase
    /// * `payment` - Amount paid; must equal the listed cost exactly
    ///
    /// # Errors
    /// - OutOfStock: no remaining stock, or the id was never listed
    /// - IncorrectPayment: payment differs from the listed cost
    /// - TransferFailed: the token transfer from the buyer was rejected
    pub fn buy(env: Env, buyer: Address, id: u64, payment: i128) -> Result<(), Error> {
        buyer.require_auth();

        let mut items: Map<u64, Item> = env.storage().instance().get(&ITEMS_KEY).unwrap();
        let mut item = match items.get(id) {
            Some(item) if item.stock > 0 => item,
            _ => return Err(Error::OutOfStock),
        };

        // Exact payment: under- and over-payment are both rejected.
        if payment != item.cost {
            return Err(Error::IncorrectPayment);
        }

        // Pull the payment into custody before recording the sale.
        let token_id: Address = env.storage().persistent().get(&PAY_TOKEN_KEY).unwrap();
        let token = token::Client::new(&env, &token_id);
        match token.try_transfer(&buyer, &env.current_contract_address(), &payment) {
            Ok(_) => {}
            Err(_) => {
                log!(&env, "payment transfer of {} from buyer failed", payment);
                return Err(Error::TransferFailed);
            }
        }

        item.stock -= 1;
        items.set(id, item.clone());
        env.storage().instance().set(&ITEMS_KEY, &items);

        // Record the order under the next 1-based index for this buyer. The
        // snapshot carries the post-sale stock.
        let mut counts: Map<Address, u64> = env.storage().instance().get(&ORDER_CNT_KEY).unwrap();
        let index = counts.get(buyer.clone()).unwrap_or(0) + 1;
        counts.set(buyer.clone(), index);

        let mut orders: Map<(Address, u64), Order> =
            env.storage().instance().get(&ORDERS_KEY).unwrap();
        orders.set(
            (buyer.clone(), index),
            Order {
                time: env.ledger().timestamp(),
                item,
            },
        );

        env.storage().instance().set(&ORDER_CNT_KEY, &counts);
        env.storage().instance().set(&ORDERS_KEY, &orders);

        let balance: i128 = env.storage().instance().get(&BALANCE_KEY).unwrap();
        env.storage().instance().set(&BALANCE_KEY, &(balance + payment));

        env.events().publish((PURCHASE, buyer), (id, index));

        Ok(())
    }

    /// Drains the entire custodied balance to the operator.
    ///
    /// # Arguments
    /// * `caller` - Must be the operator (must sign transaction)
    ///
    /// # Errors
    /// - Unauthorized: caller is not the operator
    /// - TransferFailed: the outbound transfer was rejected; the invocation
    ///   is rolled back and the balance remains custodied
    pub fn withdraw(env: Env, caller: Address) -> Result<(), Error> {
        Self::require_operator(&env, &caller)?;

        let amount: i128 = env.storage().instance().get(&BALANCE_KEY).unwrap();

        let token_id: Address = env.storage().persistent().get(&PAY_TOKEN_KEY).unwrap();
        let token = token::Client::new(&env, &token_id);
        match token.try_transfer(&env.current_contract_address(), &caller, &amount) {
            Ok(_) => {}
            Err(_) => {
                log!(&env, "withdrawal transfer of {} failed", amount);
                return Err(Error::TransferFailed);
            }
        }

        env.storage().instance().set(&BALANCE_KEY, &0i128);

        Ok(())
    }

    // ================================================================================================
    // QUERY FUNCTIONS (GETTERS)
    // ================================================================================================
    // Read-only access to contract state. No authorization.

    /// Returns the catalog entry for `id`, or a vacant item (zeroed fields,
    /// empty strings) if the id was never listed.
    pub fn get_item(env: Env, id: u64) -> Item {
        let items: Map<u64, Item> = env.storage().instance().get(&ITEMS_KEY).unwrap();
        items.get(id).unwrap_or_else(|| Item::vacant(&env))
    }

    /// Returns the order at 1-based `index` in `buyer`'s history, if any.
    pub fn get_order(env: Env, buyer: Address, index: u64) -> Option<Order> {
        let orders: Map<(Address, u64), Order> =
            env.storage().instance().get(&ORDERS_KEY).unwrap();
        orders.get((buyer, index))
    }

    /// Returns the number of orders recorded for `buyer`. This is also the
    /// index of that buyer's most recent order.
    pub fn get_order_count(env: Env, buyer: Address) -> u64 {
        let counts: Map<Address, u64> = env.storage().instance().get(&ORDER_CNT_KEY).unwrap();
        counts.get(buyer).unwrap_or(0)
    }

    /// Returns the operator address.
    pub fn get_operator(env: Env) -> Address {
        env.storage().persistent().get(&OPERATOR_KEY).unwrap()
    }

    /// Returns the payment token contract address.
    pub fn get_payment_token(env: Env) -> Address {
        env.storage().persistent().get(&PAY_TOKEN_KEY).unwrap()
    }

    /// Returns the custodied balance: payments received minus withdrawals.
    pub fn get_balance(env: Env) -> i128 {
        env.storage().instance().get(&BALANCE_KEY).unwrap()
    }
}
