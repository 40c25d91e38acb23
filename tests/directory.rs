//! End-to-end tests over a temp-file database: activity depth rules,
//! subtree expansion, geo queries, and organization referential checks.

use std::path::PathBuf;

use tempfile::TempDir;

use orgdir::models::{NewOrganization, OrganizationPatch};
use orgdir::repository::schema;
use orgdir::services::{ActivityService, BuildingService, Error, OrganizationService};

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("directory.db");
    schema::init_schema(&db).unwrap();
    (dir, db)
}

fn new_org(name: &str, building_id: i64, activity_ids: &[i64]) -> NewOrganization {
    NewOrganization {
        name: name.to_string(),
        phone_numbers: vec!["+7-495-000-0000".to_string()],
        building_id,
        activity_ids: activity_ids.to_vec(),
    }
}

#[test]
fn activity_level_is_parent_level_plus_one() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let food = activities.create("Еда", None).unwrap();
    assert_eq!(food.level, 1);
    assert_eq!(food.parent_id, None);

    let meat = activities.create("Мясная продукция", Some(food.id)).unwrap();
    assert_eq!(meat.level, 2);

    let sausages = activities.create("Колбасы", Some(meat.id)).unwrap();
    assert_eq!(sausages.level, 3);
}

#[test]
fn fourth_level_is_rejected_before_creation() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let l1 = activities.create("Еда", None).unwrap();
    let l2 = activities.create("Мясная продукция", Some(l1.id)).unwrap();
    let l3 = activities.create("Колбасы", Some(l2.id)).unwrap();

    let err = activities.create("Сырокопченые", Some(l3.id)).unwrap_err();
    assert!(matches!(err, Error::MaxDepthExceeded));

    // Nothing was written for the rejected node.
    assert_eq!(activities.list().unwrap().len(), 3);
}

#[test]
fn create_under_unknown_parent_fails() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let err = activities.create("Выпечка", Some(999)).unwrap_err();
    assert!(matches!(err, Error::ParentNotFound(999)));
}

#[test]
fn subtree_ids_cover_descendants_and_nothing_else() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let cars = activities.create("Автомобили", None).unwrap();
    let passenger = activities.create("Легковые", Some(cars.id)).unwrap();
    let parts = activities.create("Запчасти", Some(passenger.id)).unwrap();
    let trucks = activities.create("Грузовые", Some(cars.id)).unwrap();
    let food = activities.create("Еда", None).unwrap();

    let ids = activities.subtree_ids(cars.id).unwrap();
    assert!(ids.contains(&cars.id));
    assert!(ids.contains(&passenger.id));
    assert!(ids.contains(&parts.id));
    assert!(ids.contains(&trucks.id));
    assert!(!ids.contains(&food.id));
    assert_eq!(ids.len(), 4);

    // A leaf (or unknown node) yields just itself.
    assert_eq!(activities.subtree_ids(parts.id).unwrap(), vec![parts.id]);
    assert_eq!(activities.subtree_ids(12345).unwrap(), vec![12345]);
}

#[test]
fn roots_are_ordered_by_id() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let b = activities.create("Услуги", None).unwrap();
    let a = activities.create("Еда", None).unwrap();
    activities.create("Выпечка", Some(a.id)).unwrap();

    let roots = activities.roots().unwrap();
    let ids: Vec<i64> = roots.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
fn tree_nests_children_under_parents() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);

    let food = activities.create("Еда", None).unwrap();
    let bakery = activities.create("Выпечка", Some(food.id)).unwrap();
    let bread = activities.create("Хлеб", Some(bakery.id)).unwrap();
    activities.create("Медицина", None).unwrap();

    let tree = activities.tree().unwrap();
    assert_eq!(tree.len(), 2);
    let food_node = &tree[0];
    assert_eq!(food_node.activity.id, food.id);
    assert_eq!(food_node.children.len(), 1);
    assert_eq!(food_node.children[0].activity.id, bakery.id);
    assert_eq!(food_node.children[0].children[0].activity.id, bread.id);
}

#[test]
fn activity_delete_cascades_to_subtree_only() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let cars = activities.create("Автомобили", None).unwrap();
    let passenger = activities.create("Легковые", Some(cars.id)).unwrap();
    let food = activities.create("Еда", None).unwrap();

    let b = buildings.create("ул. Арбат, 10", 55.7520, 37.5920).unwrap();
    let org = organizations
        .create(&new_org("Автосалон", b.id, &[passenger.id, food.id]))
        .unwrap();

    assert!(activities.delete(cars.id).unwrap());
    assert!(matches!(
        activities.get(passenger.id).unwrap_err(),
        Error::ActivityNotFound(_)
    ));
    // The organization survives with only the unrelated tag left.
    let org = organizations.get(org.id).unwrap();
    assert_eq!(org.activity_ids, vec![food.id]);
    // Deleting again reports nothing removed.
    assert!(!activities.delete(cars.id).unwrap());
}

#[test]
fn create_organization_validates_references() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let food = activities.create("Еда", None).unwrap();

    // Unknown building.
    let err = organizations
        .create(&new_org("Пекарня", 77, &[food.id]))
        .unwrap_err();
    assert!(matches!(err, Error::BuildingNotFound(77)));

    // One bad activity ID rejects the whole request and persists nothing.
    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    let err = organizations
        .create(&new_org("Пекарня", b.id, &[food.id, 999]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidActivityIds));
    assert!(organizations.list().unwrap().is_empty());

    // Valid request goes through; duplicate activity IDs collapse.
    let org = organizations
        .create(&new_org("Пекарня", b.id, &[food.id, food.id]))
        .unwrap();
    assert_eq!(org.activity_ids, vec![food.id]);
    assert_eq!(org.building_id, b.id);
}

#[test]
fn organization_requires_phone_and_name() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();

    let mut input = new_org("Пекарня", b.id, &[]);
    input.phone_numbers.clear();
    assert!(matches!(
        organizations.create(&input).unwrap_err(),
        Error::InvalidInput(_)
    ));

    let input = new_org("", b.id, &[]);
    assert!(matches!(
        organizations.create(&input).unwrap_err(),
        Error::InvalidInput(_)
    ));
}

#[test]
fn by_building_checks_building_exists() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    assert!(matches!(
        organizations.by_building(5).unwrap_err(),
        Error::BuildingNotFound(5)
    ));

    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    let other = buildings.create("ул. Арбат, 10", 55.7520, 37.5920).unwrap();
    organizations.create(&new_org("Кафе", b.id, &[])).unwrap();
    organizations.create(&new_org("Бар", other.id, &[])).unwrap();

    let in_b = organizations.by_building(b.id).unwrap();
    assert_eq!(in_b.len(), 1);
    assert_eq!(in_b[0].name, "Кафе");
}

#[test]
fn by_activity_with_and_without_children() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let cars = activities.create("Автомобили", None).unwrap();
    let passenger = activities.create("Легковые", Some(cars.id)).unwrap();
    let parts = activities.create("Запчасти", Some(passenger.id)).unwrap();

    let b = buildings.create("ул. Арбат, 10", 55.7520, 37.5920).unwrap();
    let direct = organizations
        .create(&new_org("Автосалон", b.id, &[passenger.id]))
        .unwrap();
    let tagged_child = organizations
        .create(&new_org("Магазин запчастей", b.id, &[parts.id]))
        .unwrap();

    let without = organizations.by_activity(passenger.id, false).unwrap();
    let ids: Vec<i64> = without.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![direct.id]);

    let with = organizations.by_activity(passenger.id, true).unwrap();
    let ids: Vec<i64> = with.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![direct.id, tagged_child.id]);

    assert!(matches!(
        organizations.by_activity(404, false).unwrap_err(),
        Error::ActivityNotFound(404)
    ));
}

#[test]
fn radius_query_finds_near_and_excludes_far() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let center = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    // Roughly 5 km away.
    let far = buildings.create("Ленинский проспект, 25", 55.7100, 37.5800).unwrap();
    organizations.create(&new_org("Центр", center.id, &[])).unwrap();
    organizations.create(&new_org("Окраина", far.id, &[])).unwrap();

    let near = buildings.in_radius(55.7558, 37.6173, 1.0).unwrap();
    let ids: Vec<i64> = near.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![center.id]);

    let tiny = buildings.in_radius(55.7558, 37.6173, 0.0001).unwrap();
    assert_eq!(tiny.len(), 1, "the exact center point still matches");

    let orgs = organizations.in_radius(55.7558, 37.6173, 1.0).unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].name, "Центр");

    // Wide enough to catch both.
    let orgs = organizations.in_radius(55.7558, 37.6173, 10.0).unwrap();
    assert_eq!(orgs.len(), 2);
}

#[test]
fn tiny_radius_excludes_building_5km_away() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);

    buildings.create("Ленинский проспект, 25", 55.7100, 37.5800).unwrap();
    let hits = buildings.in_radius(55.7558, 37.6173, 0.0001).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn bounding_box_query_is_inclusive() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let corner = buildings.create("Угловое", 55.70, 37.50).unwrap();
    let inside = buildings.create("Внутри", 55.75, 37.60).unwrap();
    buildings.create("Снаружи", 56.10, 37.60).unwrap();

    let hits = buildings.in_bounding_box(55.70, 55.80, 37.50, 37.70).unwrap();
    let ids: Vec<i64> = hits.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![corner.id, inside.id]);

    organizations.create(&new_org("Кафе", inside.id, &[])).unwrap();
    let orgs = organizations
        .in_bounding_box(55.70, 55.80, 37.50, 37.70)
        .unwrap();
    assert_eq!(orgs.len(), 1);
}

#[test]
fn geo_parameters_are_validated() {
    let (_dir, db) = setup();
    let organizations = OrganizationService::new(&db);

    assert!(matches!(
        organizations.in_radius(91.0, 37.0, 1.0).unwrap_err(),
        Error::InvalidInput(_)
    ));
    assert!(matches!(
        organizations.in_radius(55.0, 37.0, 0.0).unwrap_err(),
        Error::InvalidInput(_)
    ));
    assert!(matches!(
        organizations.in_radius(55.0, 37.0, 1000.1).unwrap_err(),
        Error::InvalidInput(_)
    ));
    assert!(matches!(
        organizations
            .in_bounding_box(55.8, 55.7, 37.5, 37.7)
            .unwrap_err(),
        Error::InvalidInput(_)
    ));
}

#[test]
fn name_search_is_unicode_case_insensitive() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    organizations
        .create(&new_org("ООО \"Мясной Дом\"", b.id, &[]))
        .unwrap();
    organizations.create(&new_org("Bakery House", b.id, &[])).unwrap();

    // Single character is below the minimum.
    assert!(matches!(
        organizations.search_by_name("а").unwrap_err(),
        Error::QueryTooShort
    ));

    let hits = organizations.search_by_name("дом").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "ООО \"Мясной Дом\"");

    let hits = organizations.search_by_name("HOUSE").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Bakery House");

    assert!(organizations.search_by_name("нет такой").unwrap().is_empty());
}

#[test]
fn update_validates_before_mutating() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let food = activities.create("Еда", None).unwrap();
    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    let org = organizations
        .create(&new_org("Кафе", b.id, &[food.id]))
        .unwrap();

    // Unknown organization.
    assert!(matches!(
        organizations.update(404, &OrganizationPatch::default()).unwrap_err(),
        Error::OrganizationNotFound(404)
    ));

    // Unknown replacement building leaves the row untouched.
    let patch = OrganizationPatch {
        name: Some("Ресторан".to_string()),
        building_id: Some(999),
        ..Default::default()
    };
    assert!(matches!(
        organizations.update(org.id, &patch).unwrap_err(),
        Error::BuildingNotFound(999)
    ));
    assert_eq!(organizations.get(org.id).unwrap().name, "Кафе");

    // Bad activity set is rejected whole.
    let patch = OrganizationPatch {
        activity_ids: Some(vec![food.id, 999]),
        ..Default::default()
    };
    assert!(matches!(
        organizations.update(org.id, &patch).unwrap_err(),
        Error::InvalidActivityIds
    ));
    assert_eq!(organizations.get(org.id).unwrap().activity_ids, vec![food.id]);

    // Valid partial update applies only supplied fields.
    let bakery = activities.create("Выпечка", None).unwrap();
    let patch = OrganizationPatch {
        name: Some("Ресторан".to_string()),
        activity_ids: Some(vec![bakery.id]),
        ..Default::default()
    };
    let updated = organizations.update(org.id, &patch).unwrap();
    assert_eq!(updated.name, "Ресторан");
    assert_eq!(updated.activity_ids, vec![bakery.id]);
    assert_eq!(updated.building_id, b.id);
    assert_eq!(updated.phone_numbers, vec!["+7-495-000-0000".to_string()]);
}

#[test]
fn delete_organization_leaves_references_alone() {
    let (_dir, db) = setup();
    let activities = ActivityService::new(&db);
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let food = activities.create("Еда", None).unwrap();
    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    let org = organizations
        .create(&new_org("Кафе", b.id, &[food.id]))
        .unwrap();

    assert!(organizations.delete(org.id).unwrap());
    assert!(!organizations.delete(org.id).unwrap());

    // Building and activity lifecycles are independent.
    assert!(buildings.get(b.id).is_ok());
    assert!(activities.get(food.id).is_ok());
}

#[test]
fn phone_numbers_round_trip_through_storage() {
    let (_dir, db) = setup();
    let buildings = BuildingService::new(&db);
    let organizations = OrganizationService::new(&db);

    let b = buildings.create("ул. Тверская, 1", 55.7558, 37.6173).unwrap();
    let mut input = new_org("Кафе", b.id, &[]);
    input.phone_numbers = vec![
        "+7-495-111-1111".to_string(),
        "+7-495-111-1112".to_string(),
    ];
    let org = organizations.create(&input).unwrap();

    let fetched = organizations.get(org.id).unwrap();
    assert_eq!(fetched.phone_numbers, input.phone_numbers);
}
