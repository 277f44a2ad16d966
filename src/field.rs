/// Static description of one form input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,         // Wire name sent to the backend (e.g. "mean radius")
    pub label: &'static str,       // Human readable label (e.g. "Mean Radius")
    pub range: &'static str,       // Display hint, "<min> – <max>" or "<min> to <max>"
    pub unit: Option<&'static str>,
}

/// Numeric bounds parsed out of a range hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, range: &'static str, unit: Option<&'static str>) -> Self {
        Self { key, label, range, unit }
    }

    /// Parses the display hint into bounds. Accepts `"<min> – <max>"`,
    /// `"<min> - <max>"` and `"<min> to <max>"`; anything else yields `None`.
    pub fn bounds(&self) -> Option<RangeBounds> {
        let (lo, hi) = self
            .range
            .split_once('–')
            .or_else(|| self.range.split_once(" - "))
            .or_else(|| self.range.split_once(" to "))?;
        let min = lo.trim().parse::<f64>().ok()?;
        let max = hi.trim().parse::<f64>().ok()?;
        if min > max {
            return None;
        }
        Some(RangeBounds { min, max })
    }

    /// One line prompt text, e.g. `Mean Radius [6.0 – 28.0 mm]`.
    pub fn prompt(&self) -> String {
        match self.unit {
            Some(unit) => format!("{} [{} {}]", self.label, self.range, unit),
            None => format!("{} [{}]", self.label, self.range),
        }
    }
}

pub const DIABETES_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("age", "Age", "-0.11 – 0.11", Some("scaled")),
    FieldSpec::new("bmi", "Body Mass Index", "-0.09 – 0.17", Some("scaled")),
    FieldSpec::new("bp", "Average Blood Pressure", "-0.12 – 0.14", Some("scaled")),
    FieldSpec::new("s1", "Total Serum Cholesterol (tc)", "-0.13 – 0.16", Some("scaled")),
    FieldSpec::new("s2", "Low-Density Lipoproteins (ldl)", "-0.12 – 0.20", Some("scaled")),
    FieldSpec::new("s3", "High-Density Lipoproteins (hdl)", "-0.11 – 0.19", Some("scaled")),
    FieldSpec::new("s4", "Total Cholesterol / HDL (tch)", "-0.08 – 0.19", Some("scaled")),
    FieldSpec::new("s5", "Log Serum Triglycerides (ltg)", "-0.13 – 0.14", Some("scaled")),
    FieldSpec::new("s6", "Blood Sugar Level (glu)", "-0.14 – 0.14", Some("scaled")),
];

pub const BREAST_CANCER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("mean radius", "Mean Radius", "6.0 – 28.0", Some("mm")),
    FieldSpec::new("mean texture", "Mean Texture", "9.0 – 40.0", Some("standard deviations")),
    FieldSpec::new("mean perimeter", "Mean Perimeter", "40.0 – 190.0", Some("mm")),
    FieldSpec::new("mean area", "Mean Area", "140.0 – 2500.0", Some("mm²")),
    FieldSpec::new("mean smoothness", "Mean Smoothness", "0.05 – 0.16", Some("local variation")),
    FieldSpec::new("mean compactness", "Mean Compactness", "0.02 – 0.35", Some("perimeter²/area - 1")),
    FieldSpec::new("mean concavity", "Mean Concavity", "0.0 – 0.43", Some("severity of concave portions")),
    FieldSpec::new("mean concave points", "Mean Concave Points", "0.0 – 0.20", Some("number of concave portions")),
    FieldSpec::new("mean symmetry", "Mean Symmetry", "0.1 – 0.27", Some("symmetry measure")),
    FieldSpec::new("mean fractal dimension", "Mean Fractal Dimension", "0.05 – 0.10", Some("coastline approximation")),
    FieldSpec::new("radius error", "Radius Error", "0.1 – 2.0", Some("mm")),
    FieldSpec::new("texture error", "Texture Error", "0.2 – 4.0", Some("standard deviations")),
    FieldSpec::new("perimeter error", "Perimeter Error", "0.5 – 20.0", Some("mm")),
    FieldSpec::new("area error", "Area Error", "2.0 – 550.0", Some("mm²")),
    FieldSpec::new("smoothness error", "Smoothness Error", "0.001 – 0.03", Some("local variation")),
    FieldSpec::new("compactness error", "Compactness Error", "0.002 – 0.08", Some("perimeter²/area - 1")),
    FieldSpec::new("concavity error", "Concavity Error", "0.0 – 0.1", Some("severity of concave portions")),
    FieldSpec::new("concave points error", "Concave Points Error", "0.0 – 0.05", Some("number of concave portions")),
    FieldSpec::new("symmetry error", "Symmetry Error", "0.008 – 0.08", Some("symmetry measure")),
    FieldSpec::new("fractal dimension error", "Fractal Dimension Error", "0.001 – 0.03", Some("coastline approximation")),
    FieldSpec::new("worst radius", "Worst Radius", "7.0 – 36.0", Some("mm")),
    FieldSpec::new("worst texture", "Worst Texture", "12.0 – 50.0", Some("standard deviations")),
    FieldSpec::new("worst perimeter", "Worst Perimeter", "50.0 – 250.0", Some("mm")),
    FieldSpec::new("worst area", "Worst Area", "200.0 – 4300.0", Some("mm²")),
    FieldSpec::new("worst smoothness", "Worst Smoothness", "0.07 – 0.22", Some("local variation")),
    FieldSpec::new("worst compactness", "Worst Compactness", "0.05 – 0.85", Some("perimeter²/area - 1")),
    FieldSpec::new("worst concavity", "Worst Concavity", "0.0 – 1.0", Some("severity of concave portions")),
    FieldSpec::new("worst concave points", "Worst Concave Points", "0.0 – 0.30", Some("number of concave portions")),
    FieldSpec::new("worst symmetry", "Worst Symmetry", "0.15 – 0.45", Some("symmetry measure")),
    FieldSpec::new("worst fractal dimension", "Worst Fractal Dimension", "0.06 – 0.15", Some("coastline approximation")),
];

pub const BANKNOTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("var", "Surface Texture Quality", "-10 to 10", None),
    FieldSpec::new("skew", "Pattern Alignment", "-10 to 10", None),
    FieldSpec::new("curt", "Print Quality", "-10 to 10", None),
    FieldSpec::new("entr", "Image Detail Complexity", "-10 to 10", None),
];

pub const BITCOIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("price", "Current Bitcoin Price", "0 – 500000", Some("USD")),
];
