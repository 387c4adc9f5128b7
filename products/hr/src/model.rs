use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// An employee as exchanged with clients.
///
/// Direct reports are kept in the order the client supplied them. A `null` or
/// missing `directReports` is read as an empty list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub direct_reports: Vec<EmployeeNode>,
}

impl Employee {
    pub fn has_descriptive_fields(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.position.is_some()
            || self.department.is_some()
    }
}

/// A node of the reporting tree.
///
/// Values that carry an id and nothing else are references to a stored
/// record; everything else is taken as a record in its own right. The split
/// happens once, when the node is built from an [`Employee`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(from = "Employee", into = "Employee")]
pub enum EmployeeNode {
    Reference(EmployeeRef),
    Record(Employee),
}

/// Identifier-only view of an employee. The direct reports are whatever the
/// caller attached and are only trusted when no stored record exists.
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeRef {
    pub employee_id: String,
    pub direct_reports: Vec<EmployeeNode>,
}

impl EmployeeNode {
    pub fn reference(employee_id: impl Into<String>) -> Self {
        Self::Reference(EmployeeRef {
            employee_id: employee_id.into(),
            direct_reports: Vec::new(),
        })
    }

    pub fn employee_id(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) => Some(&reference.employee_id),
            Self::Record(employee) => employee.employee_id.as_deref(),
        }
    }

    pub fn direct_reports(&self) -> &[EmployeeNode] {
        match self {
            Self::Reference(reference) => &reference.direct_reports,
            Self::Record(employee) => &employee.direct_reports,
        }
    }
}

impl From<Employee> for EmployeeNode {
    fn from(employee: Employee) -> Self {
        let complete = employee.has_descriptive_fields();
        match employee {
            Employee {
                employee_id: Some(employee_id),
                direct_reports,
                ..
            } if !complete => Self::Reference(EmployeeRef {
                employee_id,
                direct_reports,
            }),
            employee => Self::Record(employee),
        }
    }
}

impl From<EmployeeNode> for Employee {
    fn from(node: EmployeeNode) -> Self {
        match node {
            EmployeeNode::Reference(reference) => Employee {
                employee_id: Some(reference.employee_id),
                direct_reports: reference.direct_reports,
                ..Default::default()
            },
            EmployeeNode::Record(employee) => employee,
        }
    }
}

/// Derived on request, never persisted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub id: String,
    pub employee_id: String,
    pub salary: f64,
    pub effective_date: NaiveDate,
}

/// Client input for a new compensation record. `id` and `employeeId` in the
/// body are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompensation {
    pub salary: f64,
    pub effective_date: NaiveDate,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
