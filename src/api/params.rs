use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept strings, numbers and booleans alike and normalize them to text.
/// Query strings and forms only carry text while JSON bodies often send
/// `"salary": 52000` or `"dept_id": 3`.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyParams {
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentParams {
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dept_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dept_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dept_no: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeParams {
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub emp_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub emp_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub emp_no: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hire_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dept_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mng_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimecardParams {
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timecard_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub emp_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_become_text() {
        let params: EmployeeParams = serde_json::from_value(json!({
            "company": "ab1234",
            "salary": 52000,
            "dept_id": 3,
            "mng_id": null
        }))
        .unwrap();
        assert_eq!(params.salary.as_deref(), Some("52000"));
        assert_eq!(params.dept_id.as_deref(), Some("3"));
        assert_eq!(params.mng_id, None);
        assert_eq!(params.job, None);
    }

    #[test]
    fn query_strings_deserialize() {
        let uri: axum::http::Uri = "/timecard?company=ab1234&timecard_id=7".parse().unwrap();
        let axum::extract::Query(params) =
            axum::extract::Query::<TimecardParams>::try_from_uri(&uri).unwrap();
        assert_eq!(params.company.as_deref(), Some("ab1234"));
        assert_eq!(params.timecard_id.as_deref(), Some("7"));
        assert_eq!(params.start_time, None);
    }
}
