//! End-to-end inventory scenarios against a real file.

use std::fs;

use serde_json::{json, Map, Value};
use stockroom_inventory::{Inventory, InventoryError, InventoryManager, LoadReport};
use stockroom_models::{Dimensions, ModelError, ProductBuilder, ProductKind, ProductType};
use tempfile::tempdir;

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn physical_product_survives_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");

    let widget = ProductBuilder::physical("Widget", "Tools")
        .price(9.99)
        .quantity(10)
        .weight(1.5)
        .dimensions(Dimensions::new(2.0, 2.0, 2.0))
        .build()
        .unwrap();

    let mut manager = InventoryManager::new(&path);
    let id = manager.add_product(widget.clone()).unwrap();
    manager.save().unwrap();

    let (reloaded, report) = InventoryManager::open(&path).unwrap();
    assert_eq!(report, LoadReport { loaded: 1, skipped: 0 });

    let product = reloaded.inventory().get(&id).unwrap();
    assert_eq!(product.id(), widget.id());
    assert_eq!(product.name(), "Widget");
    assert_eq!(product.price(), 9.99);
    assert_eq!(product.quantity(), 10);
    assert_eq!(product.category(), "Tools");
    assert_eq!(
        product.kind(),
        &ProductKind::physical(1.5, Dimensions::new(2.0, 2.0, 2.0))
    );
    assert_eq!(product.created_at(), widget.created_at());
    assert_eq!(product.updated_at(), widget.updated_at());
}

#[test]
fn remove_stock_beyond_quantity_fails() {
    let dir = tempdir().unwrap();
    let mut manager = InventoryManager::new(dir.path().join("inventory.json"));
    let id = manager
        .add_product(
            ProductBuilder::digital("Plugin", "Software")
                .quantity(3)
                .build()
                .unwrap(),
        )
        .unwrap();

    let err = manager.remove_stock(&id, 5).unwrap_err();

    assert!(matches!(
        err,
        InventoryError::Product(ModelError::InsufficientStock {
            available: 3,
            requested: 5
        })
    ));
    assert_eq!(manager.inventory().get(&id).unwrap().quantity(), 3);
}

#[test]
fn unknown_record_types_are_skipped_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let records = json!([
        {
            "id": "deadbeef",
            "name": "Mystery",
            "price": 1.0,
            "quantity": 1,
            "category": "Misc",
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00",
            "type": "UnknownType"
        },
        {
            "id": "c0ffee00",
            "name": "Photo Pack",
            "price": 4.99,
            "quantity": 100,
            "category": "Images",
            "created_at": "2024-01-02T08:15:30.250000",
            "updated_at": "2024-01-03T10:00:00.000001",
            "type": "DigitalProduct",
            "file_size": 250.5,
            "download_link": "https://example.com/photos.zip"
        }
    ]);
    fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();

    let (manager, report) = InventoryManager::open(&path).unwrap();

    assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });
    let inventory = manager.inventory();
    assert_eq!(inventory.len(), 1);
    let product = inventory.iter().next().unwrap();
    assert_eq!(product.id().as_str(), "c0ffee00");
    assert_eq!(product.product_type(), ProductType::Digital);
    assert_eq!(
        product.kind(),
        &ProductKind::digital(250.5, "https://example.com/photos.zip")
    );
}

#[test]
fn negative_price_update_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let mut manager = InventoryManager::new(&path);
    let id = manager
        .add_product(
            ProductBuilder::service("Setup", "Services")
                .price(50.0)
                .build()
                .unwrap(),
        )
        .unwrap();

    let err = manager
        .update_product(&id, &fields(json!({"price": -1})))
        .unwrap_err();

    assert!(matches!(
        err,
        InventoryError::Product(ModelError::Validation { field: "price", .. })
    ));
    assert_eq!(manager.inventory().get(&id).unwrap().price(), 50.0);

    let (reloaded, _) = InventoryManager::open(&path).unwrap();
    assert_eq!(reloaded.inventory().get(&id).unwrap().price(), 50.0);
}

#[test]
fn every_variant_round_trips_through_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let mut manager = InventoryManager::new(&path);

    let products = vec![
        ProductBuilder::physical("Desk", "Furniture")
            .price(149.0)
            .quantity(2)
            .weight(32.25)
            .dimensions(Dimensions::new(120.0, 60.0, 75.5))
            .build()
            .unwrap(),
        ProductBuilder::digital("Font Family", "Design")
            .price(0.1 + 0.2)
            .quantity(1000)
            .file_size(3.3)
            .build()
            .unwrap(),
        ProductBuilder::service("Assembly", "Services")
            .price(35.0)
            .quantity(8)
            .duration(120)
            .service_type("On-site")
            .build()
            .unwrap(),
    ];
    for product in &products {
        manager.add_product(product.clone()).unwrap();
    }

    let (reloaded, _) = InventoryManager::open(&path).unwrap();
    let restored: Vec<_> = reloaded.inventory().iter().cloned().collect();
    assert_eq!(restored, products);
}

#[test]
fn duplicate_add_leaves_store_unchanged() {
    let mut inventory = Inventory::new();
    let product = ProductBuilder::physical("Lamp", "Lighting")
        .quantity(1)
        .build()
        .unwrap();
    inventory.add(product.clone()).unwrap();

    let err = inventory.add(product.clone()).unwrap_err();

    assert!(matches!(err, InventoryError::DuplicateId(_)));
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.iter().next().unwrap(), &product);
}
