//! The canonical set of weather parameters requested from the API.
//!
//! The same sorted name list drives both the request payload and the CSV
//! column schema, so every chunk appends under one header.

/// Ordered, duplicate-free parameter names (sorted on construction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    names: Vec<String>,
}

impl ParameterSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();

        ParameterSet { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Comma-separated list for the `params` query argument.
    pub fn query_string(&self) -> String {
        self.names.join(",")
    }

    /// CSV header: the date column followed by the sorted parameter names.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(1 + self.names.len());
        columns.push("date".to_string());
        columns.extend(self.names.iter().cloned());

        columns
    }
}

impl Default for ParameterSet {
    /// The full marine parameter set collected by this tool.
    fn default() -> Self {
        ParameterSet::new([
            "airTemperature",
            "cloudCover",
            "currentDirection",
            "currentSpeed",
            "gust",
            "humidity",
            "precipitation",
            "pressure",
            "seaLevel",
            "swellDirection",
            "swellHeight",
            "swellPeriod",
            "visibility",
            "waterTemperature",
            "waveDirection",
            "waveHeight",
            "wavePeriod",
            "windDirection",
            "windSpeed",
        ])
    }
}

// -- Tests -------------------------------------------------------------------
