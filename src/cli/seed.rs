//! Demo dataset: Moscow buildings, a three-level activity taxonomy, and the
//! organizations occupying them.

use std::path::Path;

use tracing::info;

use crate::models::NewOrganization;
use crate::services::{ActivityService, BuildingService, OrganizationService, Result};

/// Seed the demo dataset into an empty database.
///
/// Insertion order matters: SQLite assigns sequential row IDs, so buildings
/// land at 1..=5, activities at 1..=20 and organizations at 1..=10, which is
/// what the organization rows below reference.
pub fn seed_demo_data(db_path: &Path) -> Result<()> {
    let buildings = BuildingService::new(db_path);
    let activities = ActivityService::new(db_path);
    let organizations = OrganizationService::new(db_path);

    for (address, lat, lon) in [
        ("г. Москва, ул. Тверская, д. 1", 55.7558, 37.6173),
        ("г. Москва, ул. Арбат, д. 10", 55.7520, 37.5920),
        ("г. Москва, Ленинский проспект, д. 25", 55.7100, 37.5800),
        ("г. Москва, ул. Новый Арбат, д. 15", 55.7530, 37.5850),
        ("г. Москва, Кутузовский проспект, д. 32", 55.7400, 37.5500),
    ] {
        buildings.create(address, lat, lon)?;
    }

    // (name, parent id) pairs, level computed from the parent.
    for (name, parent_id) in [
        ("Еда", None),                  // 1
        ("Автомобили", None),           // 2
        ("Услуги", None),               // 3
        ("Медицина", None),             // 4
        ("Мясная продукция", Some(1)),  // 5
        ("Молочная продукция", Some(1)),// 6
        ("Выпечка", Some(1)),           // 7
        ("Грузовые", Some(2)),          // 8
        ("Легковые", Some(2)),          // 9
        ("Ремонт техники", Some(3)),    // 10
        ("Юридические услуги", Some(3)),// 11
        ("Стоматология", Some(4)),      // 12
        ("Терапия", Some(4)),           // 13
        ("Запчасти", Some(9)),          // 14
        ("Аксессуары", Some(9)),        // 15
        ("Шиномонтаж", Some(9)),        // 16
        ("Ремонт телефонов", Some(10)), // 17
        ("Ремонт компьютеров", Some(10)), // 18
        ("Хлеб", Some(7)),              // 19
        ("Кондитерские изделия", Some(7)), // 20
    ] {
        activities.create(name, parent_id)?;
    }

    let orgs: [(&str, &[&str], i64, &[i64]); 10] = [
        ("ООО \"Мясной Дом\"", &["+7-495-111-1111", "+7-495-111-1112"], 1, &[1, 5]),
        ("АО \"Молочный Рай\"", &["+7-495-222-2222"], 1, &[1, 6]),
        ("ИП Иванов \"АвтоЗапчасти\"", &["+7-495-333-3333", "+7-495-333-3334"], 2, &[2, 9, 14]),
        ("ООО \"Правовая Защита\"", &["+7-495-444-4444"], 2, &[3, 11]),
        ("Клиника \"Здоровая Улыбка\"", &["+7-495-555-5555", "+7-495-555-5556"], 3, &[4, 12]),
        ("СТО \"Грузовик Сервис\"", &["+7-495-666-6666"], 3, &[2, 8]),
        ("Пекарня \"Свежий Хлеб\"", &["+7-495-777-7777"], 4, &[1, 7, 19]),
        ("Сервисный центр \"ТехноМастер\"", &["+7-495-888-8888", "+7-495-888-8889"], 4, &[3, 10, 17, 18]),
        ("Автосалон \"Премиум Авто\"", &["+7-495-999-9999"], 5, &[2, 9, 15]),
        ("Медицинский центр \"Здоровье\"", &["+7-495-000-0000", "+7-495-000-0001"], 5, &[4, 12, 13]),
    ];
    for (name, phones, building_id, activity_ids) in orgs {
        organizations.create(&NewOrganization {
            name: name.to_string(),
            phone_numbers: phones.iter().map(|p| p.to_string()).collect(),
            building_id,
            activity_ids: activity_ids.to_vec(),
        })?;
    }

    info!("seeded demo dataset");
    Ok(())
}
