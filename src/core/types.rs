use serde::{Deserialize, Serialize};

/// How the restitution coefficients of two bodies combine into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MixingMode {
    #[default]
    Multiply,
    Average,
    Min,
    Max,
    GeometricMean,
}

impl MixingMode {
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            MixingMode::Multiply => a * b,
            MixingMode::Average => 0.5 * (a + b),
            MixingMode::Min => a.min(b),
            MixingMode::Max => a.max(b),
            MixingMode::GeometricMean => (a.abs() * b.abs()).sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_modes_combine_expected_values() {
        assert!((MixingMode::Multiply.combine(0.6, 0.5) - 0.3).abs() < 1e-5);
        assert!((MixingMode::Average.combine(0.6, 0.2) - 0.4).abs() < 1e-5);
        assert!((MixingMode::Min.combine(0.6, 0.2) - 0.2).abs() < 1e-5);
        assert!((MixingMode::Max.combine(0.6, 0.2) - 0.6).abs() < 1e-5);

        let expected = (0.6_f32 * 0.2_f32).sqrt();
        assert!((MixingMode::GeometricMean.combine(0.6, 0.2) - expected).abs() < 1e-5);
    }

    #[test]
    fn perfectly_elastic_partner_keeps_coefficient() {
        assert_eq!(MixingMode::Multiply.combine(0.7, 1.0), 0.7);
    }
}
