use serde::Serialize;

/// Blood pressure category (AHA thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    /// Systolic < 120 and diastolic < 80
    Normal,
    /// Systolic 120-129 and diastolic < 80
    Elevated,
    /// Systolic 130-139 or diastolic 80-89
    Hypertension1,
    /// Systolic ≥ 140 or diastolic ≥ 90
    Hypertension2,
    /// Systolic ≥ 180 or diastolic ≥ 120
    HypertensiveCrisis,
}

impl BloodPressureCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "正常",
            BloodPressureCategory::Elevated => "血压偏高",
            BloodPressureCategory::Hypertension1 => "高血压1级",
            BloodPressureCategory::Hypertension2 => "高血压2级",
            BloodPressureCategory::HypertensiveCrisis => "高血压危象",
        }
    }
}

/// Categorize a (possibly averaged) blood pressure
pub fn categorize_blood_pressure(systolic: f64, diastolic: f64) -> BloodPressureCategory {
    if systolic >= 180.0 || diastolic >= 120.0 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140.0 || diastolic >= 90.0 {
        BloodPressureCategory::Hypertension2
    } else if systolic >= 130.0 || diastolic >= 80.0 {
        BloodPressureCategory::Hypertension1
    } else if systolic >= 120.0 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bp_category_normal() {
        assert_eq!(categorize_blood_pressure(110.0, 75.0), BloodPressureCategory::Normal);
    }

    #[test]
    fn test_bp_category_elevated() {
        assert_eq!(categorize_blood_pressure(125.5, 79.9), BloodPressureCategory::Elevated);
    }

    #[test]
    fn test_bp_category_hypertension1() {
        assert_eq!(categorize_blood_pressure(135.0, 75.0), BloodPressureCategory::Hypertension1);
        // Diastolic alone is enough
        assert_eq!(categorize_blood_pressure(118.0, 85.0), BloodPressureCategory::Hypertension1);
    }

    #[test]
    fn test_bp_category_hypertension2() {
        assert_eq!(categorize_blood_pressure(160.0, 95.0), BloodPressureCategory::Hypertension2);
        assert_eq!(categorize_blood_pressure(120.0, 90.0), BloodPressureCategory::Hypertension2);
    }

    #[test]
    fn test_bp_category_crisis() {
        assert_eq!(categorize_blood_pressure(185.0, 75.0), BloodPressureCategory::HypertensiveCrisis);
        assert_eq!(categorize_blood_pressure(120.0, 125.0), BloodPressureCategory::HypertensiveCrisis);
    }
}
