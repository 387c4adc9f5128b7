use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use directory_tests::{BEST, HARRISON, LENNON, MCCARTNEY, STARR, migrated_pool};
use platform_db::{SeaOrmCompensationStore, SeaOrmEmployeeStore, SeedReport, seed_fixtures};
use products_hr::{
    CompensationService, CompensationStore, EmployeeService, EmployeeStore, ReportingEngine,
};

#[tokio::test]
async fn seeding_twice_changes_nothing() -> Result<()> {
    let pool = migrated_pool().await?;

    let first = seed_fixtures(&pool).await?;
    assert_eq!(
        first,
        SeedReport {
            employees: 5,
            compensations: 3
        }
    );
    let second = seed_fixtures(&pool).await?;
    assert_eq!(second.compensations, 0);

    let compensations = SeaOrmCompensationStore::new(pool);
    let best = compensations.find_by_employee_id_latest_first(BEST).await?;
    assert_eq!(best.len(), 2);
    Ok(())
}

#[tokio::test]
async fn seeded_tree_matches_the_sample_org_chart() -> Result<()> {
    let pool = migrated_pool().await?;
    seed_fixtures(&pool).await?;
    let store = SeaOrmEmployeeStore::new(pool);

    let lennon = store.find_by_id(LENNON).await?.expect("seeded");
    let reports: Vec<_> = lennon
        .direct_reports
        .iter()
        .filter_map(|node| node.employee_id())
        .collect();
    assert_eq!(reports, [MCCARTNEY, STARR]);

    let starr = store.find_by_id(STARR).await?.expect("seeded");
    let reports: Vec<_> = starr
        .direct_reports
        .iter()
        .filter_map(|node| node.employee_id())
        .collect();
    assert_eq!(reports, [BEST, HARRISON]);
    Ok(())
}

#[tokio::test]
async fn seeded_report_counts() -> Result<()> {
    let pool = migrated_pool().await?;
    seed_fixtures(&pool).await?;
    let store: Arc<dyn EmployeeStore> = Arc::new(SeaOrmEmployeeStore::new(pool));
    let employees = EmployeeService::new(store.clone());
    let engine = ReportingEngine::new(store);

    for (id, expected) in [(LENNON, 4), (STARR, 2), (MCCARTNEY, 0), (BEST, 0)] {
        let structure = engine.reporting_structure(employees.read(id).await?).await?;
        assert_eq!(structure.number_of_reports, expected, "reports under {id}");
        assert_eq!(structure.employee.employee_id.as_deref(), Some(id));
    }
    Ok(())
}

#[tokio::test]
async fn seeded_current_compensation() -> Result<()> {
    let pool = migrated_pool().await?;
    seed_fixtures(&pool).await?;
    let employees = EmployeeService::new(Arc::new(SeaOrmEmployeeStore::new(pool.clone())));
    let service = CompensationService::new(
        employees.clone(),
        Arc::new(SeaOrmCompensationStore::new(pool)),
    );

    let best = service
        .current_compensation(&employees.read(BEST).await?)
        .await?
        .expect("best has compensation");
    assert_eq!(best.salary, 12000.0);
    assert_eq!(
        best.effective_date,
        NaiveDate::from_ymd_opt(1966, 12, 5).expect("valid date")
    );

    let starr = service
        .current_compensation(&employees.read(STARR).await?)
        .await?
        .expect("starr has compensation");
    assert_eq!(starr.salary, 1.0);

    let lennon = service
        .current_compensation(&employees.read(LENNON).await?)
        .await?;
    assert!(lennon.is_none());
    Ok(())
}
