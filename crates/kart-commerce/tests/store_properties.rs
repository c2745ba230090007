//! Invariants of the cart store under arbitrary operation sequences.

use std::sync::Arc;

use futures::executor::block_on;
use kart_cache::{Cache, FileStore, MemoryStore};
use kart_commerce::prelude::*;
use kart_commerce::store::default_storage_key;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Add(u64),
    Update(u64, i64),
    Remove(u64),
    Restock(u64, i64),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (1u64..6).prop_map(Action::Add),
        3 => ((1u64..6), (-2i64..6)).prop_map(|(id, amount)| Action::Update(id, amount)),
        2 => (1u64..6).prop_map(Action::Remove),
        1 => ((1u64..6), (-1i64..5)).prop_map(|(id, amount)| Action::Restock(id, amount)),
    ]
}

fn shoe(id: u64) -> Product {
    Product::new(ProductId::new(id), format!("Shoe {}", id), 99.0, "shoe.jpg")
}

/// Products 1..=4 exist; product 5 has stock but no catalog record.
fn inventory() -> InMemoryInventory {
    let inventory = InMemoryInventory::new()
        .with_product(shoe(1), 3)
        .with_product(shoe(2), 1)
        .with_product(shoe(3), 0)
        .with_product(shoe(4), 5);
    inventory.set_stock(ProductId::new(5), 2);
    inventory
}

fn assert_invariants(cart: &Cart) -> Result<(), TestCaseError> {
    let mut seen = std::collections::HashSet::new();
    for item in cart.iter() {
        prop_assert!(item.amount >= 1, "amount below one: {:?}", item);
        prop_assert!(seen.insert(item.id()), "duplicate entry: {:?}", item.id());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn cart_invariants_hold(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let inventory = Arc::new(inventory());
        let kv = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CartStore::open(
            StoreConfig::default(),
            Collaborators {
                stock: inventory.clone(),
                catalog: inventory.clone(),
                storage: Cache::shared(kv.clone()),
                notifier: notifier.clone(),
            },
        );
        let persisted = Cache::shared(kv);

        for action in actions {
            let before = store.cart();
            let notified_before = notifier.messages().len();

            let result = match action {
                Action::Add(id) => block_on(store.add_product(ProductId::new(id))),
                Action::Update(id, amount) => {
                    block_on(store.update_product_amount(ProductId::new(id), amount))
                }
                Action::Remove(id) => store.remove_product(ProductId::new(id)),
                Action::Restock(id, amount) => {
                    inventory.set_stock(ProductId::new(id), amount);
                    Ok(())
                }
            };

            let after = store.cart();
            assert_invariants(&after)?;

            let stored: Option<Cart> = persisted.get(&default_storage_key()).unwrap();
            prop_assert_eq!(stored.unwrap_or_default(), after.clone());

            let notified = notifier.messages().len() - notified_before;
            match result {
                Ok(()) => prop_assert_eq!(notified, 0),
                Err(_) => {
                    prop_assert_eq!(notified, 1);
                    prop_assert_eq!(&after, &before);
                }
            }
        }
    }

    #[test]
    fn hydration_is_idempotent(adds in prop::collection::vec(1u64..5, 0..12)) {
        let dir = tempfile::tempdir().unwrap();
        let inventory = Arc::new(inventory());
        let collaborators = || -> Collaborators {
            Collaborators {
                stock: inventory.clone(),
                catalog: inventory.clone(),
                storage: Cache::new(FileStore::open(dir.path()).unwrap()),
                notifier: Arc::new(RecordingNotifier::new()),
            }
        };

        let store = CartStore::open(StoreConfig::default(), collaborators());
        for id in adds {
            let _ = block_on(store.add_product(ProductId::new(id)));
        }

        let reopened = CartStore::open(StoreConfig::default(), collaborators());
        prop_assert_eq!(reopened.cart(), store.cart());
    }
}
