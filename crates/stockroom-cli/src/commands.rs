//! Command handlers for CLI subcommands.

use std::path::Path;

use serde_json::{Map, Value};
use stockroom_inventory::{InventoryManager, ProductFilter};
use stockroom_models::{Product, ProductBuilder, ProductId, ProductType};
use tracing::info;

use crate::cli::{AddKind, BaseArgs, Commands, OutputFormat, SearchField, StockAction};
use crate::config;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command against the inventory file at `data_file`.
pub fn execute(command: Commands, data_file: &Path) -> Result<()> {
    let mut manager = InventoryManager::new(data_file);

    // Import and clear replace the catalog wholesale, so a damaged file
    // must not block them.
    if !matches!(command, Commands::Import { .. } | Commands::Clear { .. }) {
        manager.load()?;
    }

    match command {
        Commands::Add { kind } => cmd_add(&mut manager, kind),
        Commands::Show { id, format } => cmd_show(&manager, &id, format),
        Commands::List {
            category,
            product_type,
            sort,
            format,
        } => {
            let mut filter = ProductFilter::new();
            if let Some(category) = category {
                filter = filter.with_category(category);
            }
            if let Some(product_type) = product_type {
                filter = filter.with_product_type(product_type.into());
            }
            let products = manager.inventory().list(&filter, sort.into());
            print_products(&products, format)
        }
        Commands::Search { query, by, format } => {
            let inventory = manager.inventory();
            let products = match by {
                SearchField::Name => inventory.search_by_name(&query),
                SearchField::Category => inventory.search_by_category(&query),
            };
            print_products(&products, format)
        }
        Commands::LowStock { threshold, format } => {
            let threshold = threshold.unwrap_or_else(config::low_stock_threshold);
            let products = manager.inventory().low_stock(threshold);
            print_products(&products, format)
        }
        Commands::Update { id, assignments } => cmd_update(&mut manager, &id, assignments),
        Commands::Stock { action } => cmd_stock(&mut manager, action),
        Commands::Remove { id } => {
            let product = manager.remove_product(&ProductId::from(id))?;
            println!("Removed '{}' ({})", product.name(), product.id());
            Ok(())
        }
        Commands::Summary => cmd_summary(&manager),
        Commands::Categories => {
            for category in manager.inventory().categories() {
                println!("{}", category);
            }
            Ok(())
        }
        Commands::Export { path } => {
            let count = manager.export_to(&path)?;
            println!("Exported {} product(s) to {}", count, path.display());
            Ok(())
        }
        Commands::Import { path } => {
            let report = manager.import_from(&path)?;
            println!(
                "Imported {} product(s) from {}",
                report.loaded,
                path.display()
            );
            if report.skipped > 0 {
                println!("  Skipped {} record(s) with unknown type", report.skipped);
            }
            Ok(())
        }
        Commands::Clear { yes } => {
            if !yes {
                return Err("refusing to delete every product without --yes".into());
            }
            manager.clear()?;
            println!("Inventory cleared");
            Ok(())
        }
    }
}

fn build_product(kind: AddKind) -> Result<Product> {
    let with_base = |builder: ProductBuilder, base: BaseArgs| {
        builder.price(base.price).quantity(base.quantity)
    };

    let product = match kind {
        AddKind::Physical {
            base,
            weight,
            dimensions,
        } => {
            let builder = ProductBuilder::physical(&base.name, &base.category)
                .weight(weight)
                .dimensions(dimensions.unwrap_or_default());
            with_base(builder, base).build()?
        }
        AddKind::Digital {
            base,
            file_size,
            download_link,
        } => {
            let builder = ProductBuilder::digital(&base.name, &base.category)
                .file_size(file_size)
                .download_link(download_link);
            with_base(builder, base).build()?
        }
        AddKind::Service {
            base,
            duration,
            service_type,
        } => {
            let builder = ProductBuilder::service(&base.name, &base.category)
                .duration(duration)
                .service_type(service_type);
            with_base(builder, base).build()?
        }
    };
    Ok(product)
}

fn cmd_add(manager: &mut InventoryManager, kind: AddKind) -> Result<()> {
    let product = build_product(kind)?;

    info!(
        product_id = %product.id(),
        name = %product.name(),
        product_type = %product.product_type(),
        "Adding product"
    );

    let name = product.name().to_string();
    let id = manager.add_product(product)?;
    println!("Added '{}' ({})", name, id);
    Ok(())
}

fn cmd_show(manager: &InventoryManager, id: &str, format: OutputFormat) -> Result<()> {
    let product = manager.inventory().get(&ProductId::from(id))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&product.to_record()?)?);
        }
        OutputFormat::Table | OutputFormat::Brief => {
            for (label, value) in product.display_details() {
                println!("{:<14} {}", format!("{}:", capitalize(label)), value);
            }
            println!("{:<14} {}", "Created:", product.created_at());
            println!("{:<14} {}", "Updated:", product.updated_at());
        }
    }

    Ok(())
}

fn cmd_update(
    manager: &mut InventoryManager,
    id: &str,
    assignments: Vec<(String, Value)>,
) -> Result<()> {
    let id = ProductId::from(id);
    let fields: Map<String, Value> = assignments.into_iter().collect();

    manager.update_product(&id, &fields)?;

    let product = manager.inventory().get(&id)?;
    println!("Updated {}", product);
    Ok(())
}

fn cmd_stock(manager: &mut InventoryManager, action: StockAction) -> Result<()> {
    let id = match action {
        StockAction::Add { id, amount } => {
            let id = ProductId::from(id);
            manager.add_stock(&id, amount)?;
            id
        }
        StockAction::Remove { id, amount } => {
            let id = ProductId::from(id);
            manager.remove_stock(&id, amount)?;
            id
        }
    };

    let product = manager.inventory().get(&id)?;
    println!("{}: {} in stock", product.name(), product.quantity());
    Ok(())
}

fn cmd_summary(manager: &InventoryManager) -> Result<()> {
    let inventory = manager.inventory();
    let threshold = config::low_stock_threshold();

    println!("Inventory: {}", manager.path().display());
    println!("  Products:    {}", inventory.len());
    println!("  Total value: ${:.2}", inventory.total_value());
    println!(
        "  Low stock:   {} (≤ {})",
        inventory.low_stock(threshold).len(),
        threshold
    );

    let counts = inventory.count_by_type();
    for product_type in ProductType::ALL {
        println!(
            "  {:<17}{}",
            format!("{}:", product_type.label()),
            counts.get(&product_type).copied().unwrap_or(0)
        );
    }

    Ok(())
}

fn print_products(products: &[&Product], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if products.is_empty() {
                println!("No products found.");
                return Ok(());
            }

            println!(
                "{:<41}  {:<24}  {:<16}  {:>10}  {:>8}  TYPE",
                "ID", "NAME", "CATEGORY", "PRICE", "QTY"
            );
            println!("{}", "-".repeat(120));
            for product in products {
                println!(
                    "{:<41}  {:<24}  {:<16}  {:>10}  {:>8}  {}",
                    product.id(),
                    truncate(product.name(), 24),
                    truncate(product.category(), 16),
                    format!("${:.2}", product.price()),
                    product.quantity(),
                    product.product_type().label()
                );
            }
            println!("\n{} product(s)", products.len());
        }
        OutputFormat::Json => {
            let records = products
                .iter()
                .map(|p| p.to_record())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Brief => {
            for product in products {
                println!("{}\t{}", product.id(), product);
            }
        }
    }

    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

/// Truncates to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
