use std::{future::Future, pin::Pin, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    error::HrResult,
    model::{Employee, EmployeeNode, ReportingStructure},
    store::EmployeeStore,
};

type CountFuture<'a> = Pin<Box<dyn Future<Output = HrResult<u32>> + Send + 'a>>;

/// Counts direct and indirect reports by walking the reporting tree.
///
/// Reference nodes are resolved from the store on the way down. A reference
/// with no stored record is counted from the reports attached to it, so
/// structures for employees that were never saved can still be computed.
#[derive(Clone)]
pub struct ReportingEngine {
    employees: Arc<dyn EmployeeStore>,
}

/// Outcome of resolving one node before its reports are trusted.
enum Resolution<'a> {
    Resolved(Employee),
    AsGiven(&'a EmployeeNode),
}

impl Resolution<'_> {
    fn employee_id(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(employee) => employee.employee_id.as_deref(),
            Resolution::AsGiven(node) => node.employee_id(),
        }
    }

    fn direct_reports(&self) -> &[EmployeeNode] {
        match self {
            Resolution::Resolved(employee) => &employee.direct_reports,
            Resolution::AsGiven(node) => node.direct_reports(),
        }
    }
}

impl ReportingEngine {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }

    #[instrument(
        name = "hr.reporting.structure",
        skip_all,
        fields(employee_id = employee.employee_id.as_deref().unwrap_or_default())
    )]
    pub async fn reporting_structure(&self, employee: Employee) -> HrResult<ReportingStructure> {
        let node = EmployeeNode::from(employee);
        let number_of_reports = self.count_reports(&node).await?;
        debug!(number_of_reports, "reporting structure computed");
        Ok(ReportingStructure {
            employee: node.into(),
            number_of_reports,
        })
    }

    pub async fn count_reports(&self, node: &EmployeeNode) -> HrResult<u32> {
        let mut path = Vec::new();
        self.count_below(node, &mut path).await
    }

    async fn resolve<'a>(&self, node: &'a EmployeeNode) -> HrResult<Resolution<'a>> {
        let EmployeeNode::Reference(reference) = node else {
            return Ok(Resolution::AsGiven(node));
        };
        match self.employees.find_by_id(&reference.employee_id).await? {
            Some(record) => Ok(Resolution::Resolved(record)),
            None => {
                debug!(
                    employee_id = %reference.employee_id,
                    "no stored record, using attached reports"
                );
                Ok(Resolution::AsGiven(node))
            }
        }
    }

    // `path` holds the ids of the nodes above the current one. A report that
    // is already on it closes a cycle: it is counted but not walked again.
    fn count_below<'a>(
        &'a self,
        node: &'a EmployeeNode,
        path: &'a mut Vec<String>,
    ) -> CountFuture<'a> {
        Box::pin(async move {
            let resolution = self.resolve(node).await?;
            let reports = resolution.direct_reports();
            let mut total = reports.len() as u32;

            let entered = match resolution.employee_id() {
                Some(id) => {
                    path.push(id.to_owned());
                    true
                }
                None => false,
            };
            for report in reports {
                if let Some(id) = report.employee_id() {
                    if path.iter().any(|seen| seen == id) {
                        warn!(employee_id = id, "reporting cycle detected");
                        continue;
                    }
                }
                total += self.count_below(report, path).await?;
            }
            if entered {
                path.pop();
            }
            Ok(total)
        })
    }
}
