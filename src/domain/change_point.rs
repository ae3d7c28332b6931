use serde::{Deserialize, Serialize};

pub const MISSING_EVENT_DATE: &str = "N/A";
pub const MISSING_DESCRIPTION: &str = "No description available";

/// A detected change point, with the nearest known event already resolved by
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePoint {
    #[serde(rename = "Change_Point_Date")]
    pub change_point_date: String,
    #[serde(rename = "Event_Date", default)]
    pub event_date: Option<String>,
    #[serde(rename = "Event_Description", default)]
    pub event_description: Option<String>,
}

impl ChangePoint {
    /// Blank values carry no event, the same as absent ones.
    pub fn event_date_label(&self) -> &str {
        non_blank(self.event_date.as_deref()).unwrap_or(MISSING_EVENT_DATE)
    }

    pub fn description_label(&self) -> &str {
        non_blank(self.event_description.as_deref()).unwrap_or(MISSING_DESCRIPTION)
    }

    pub fn has_event_date(&self) -> bool {
        non_blank(self.event_date.as_deref()).is_some()
    }

    pub fn has_description(&self) -> bool {
        non_blank(self.event_description.as_deref()).is_some()
    }

    /// Cells in table column order.
    pub fn cells(&self) -> [&str; 3] {
        [
            self.change_point_date.as_str(),
            self.event_date_label(),
            self.description_label(),
        ]
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub const CHANGE_POINT_HEADER: [&str; 3] = ["Change Point Date", "Event Date", "Event Description"];

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<ChangePoint> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn full_record_renders_verbatim() {
        let points = parse(
            r#"[{"Change_Point_Date":"2016-03-01","Event_Date":"2016-02-28","Event_Description":"OPEC freeze talks"}]"#,
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cells(), ["2016-03-01", "2016-02-28", "OPEC freeze talks"]);
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let points = parse(r#"[{"Change_Point_Date":"2020-04-01"}]"#);
        assert_eq!(points[0].cells(), ["2020-04-01", "N/A", "No description available"]);
    }

    #[test]
    fn null_and_empty_fields_use_placeholders() {
        let points = parse(
            r#"[{"Change_Point_Date":"2008-09-15","Event_Date":null,"Event_Description":""}]"#,
        );
        assert_eq!(points[0].event_date_label(), MISSING_EVENT_DATE);
        assert_eq!(points[0].description_label(), MISSING_DESCRIPTION);
    }

    #[test]
    fn blank_strings_use_placeholders() {
        let points = parse(
            r#"[{"Change_Point_Date":"2020-04-01","Event_Date":"","Event_Description":"   "}]"#,
        );
        assert_eq!(points[0].cells(), ["2020-04-01", "N/A", "No description available"]);
        assert!(!points[0].has_event_date());
        assert!(!points[0].has_description());
    }

    #[test]
    fn backend_filled_values_pass_through() {
        let points = parse(
            r#"[{"Change_Point_Date":"1999-03-23","Event_Date":"N/A","Event_Description":"No event within ±7 days","Extra":1}]"#,
        );
        assert_eq!(points[0].event_date_label(), "N/A");
        assert_eq!(points[0].description_label(), "No event within ±7 days");
    }

    #[test]
    fn missing_change_point_date_is_rejected() {
        let result: Result<Vec<ChangePoint>, _> =
            serde_json::from_str(r#"[{"Event_Date":"2016-02-28"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn order_is_preserved() {
        let points = parse(
            r#"[{"Change_Point_Date":"2020-04-01"},{"Change_Point_Date":"2008-09-15"},{"Change_Point_Date":"2014-11-27"}]"#,
        );
        let dates: Vec<_> = points.iter().map(|p| p.change_point_date.as_str()).collect();
        assert_eq!(dates, ["2020-04-01", "2008-09-15", "2014-11-27"]);
    }
}
