//! CLI command implementations.

use console::style;

use crate::config::Settings;
use crate::models::ActivityNode;
use crate::repository::schema;
use crate::services::{ActivityService, BuildingService, OrganizationService};

use super::seed;

/// Create the schema and seed demo data.
pub fn cmd_init(settings: &Settings, force: bool) -> anyhow::Result<()> {
    schema::init_schema(&settings.database)?;

    let buildings = BuildingService::new(&settings.database);
    if !buildings.list()?.is_empty() {
        if !force {
            println!(
                "{} Database already initialized (use --force to reseed)",
                style("!").yellow()
            );
            return Ok(());
        }
        schema::clear_data(&settings.database)?;
    }

    seed::seed_demo_data(&settings.database)?;
    println!(
        "{} Initialized directory in {}",
        style("✓").green(),
        settings.database.display()
    );
    Ok(())
}

/// Show entity counts.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let buildings = BuildingService::new(&settings.database).list()?;
    let activities = ActivityService::new(&settings.database).list()?;
    let organizations = OrganizationService::new(&settings.database).list()?;

    println!("Buildings:     {}", buildings.len());
    println!("Activities:    {}", activities.len());
    println!("Organizations: {}", organizations.len());
    Ok(())
}

/// Search organizations by name substring.
pub fn cmd_search(settings: &Settings, query: &str) -> anyhow::Result<()> {
    let service = OrganizationService::new(&settings.database);
    let results = service.search_by_name(query)?;
    if results.is_empty() {
        println!("No organizations match {:?}", query);
        return Ok(());
    }
    for org in results {
        println!(
            "{:>4}  {}  [{}]",
            org.id,
            org.name,
            org.phone_numbers.join(", ")
        );
    }
    Ok(())
}

/// List organizations within a radius of a point.
pub fn cmd_nearby(settings: &Settings, lat: f64, lon: f64, radius_km: f64) -> anyhow::Result<()> {
    let orgs = OrganizationService::new(&settings.database).in_radius(lat, lon, radius_km)?;
    let buildings = BuildingService::new(&settings.database);
    if orgs.is_empty() {
        println!("No organizations within {radius_km} km of ({lat}, {lon})");
        return Ok(());
    }
    for org in orgs {
        let building = buildings.get(org.building_id)?;
        println!("{:>4}  {}  @ {}", org.id, org.name, building.address);
    }
    Ok(())
}

/// Render the activity hierarchy.
pub fn cmd_tree(settings: &Settings) -> anyhow::Result<()> {
    let roots = ActivityService::new(&settings.database).tree()?;
    for root in &roots {
        print_node(root, 0);
    }
    Ok(())
}

fn print_node(node: &ActivityNode, depth: usize) {
    println!(
        "{}{} ({})",
        "  ".repeat(depth),
        node.activity.name,
        node.activity.id
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
