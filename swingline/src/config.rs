use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bar::PriceBar;
use crate::constant::{Const, SwingError, validate_strength};
use crate::swing::{SwingPoint, compute_swing_points};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingConfig {
    /// 枢轴两侧各需要的 bar 数量。
    #[serde(default = "default_strength")]
    pub strength: i64,
}

fn default_strength() -> i64 {
    Const::DEFAULT_STRENGTH
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            strength: Const::DEFAULT_STRENGTH,
        }
    }
}

impl SwingConfig {
    pub fn new(strength: i64) -> Self {
        Self { strength }
    }

    /// 按扩展名读取 json / yaml 配置并校验。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SwingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|x| x.to_str()) {
            Some("json") => serde_json::from_str(&text)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            _ => return Err(SwingError::UnsupportedFormat(path.display().to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SwingError> {
        validate_strength(self.strength).map(|_| ())
    }

    pub fn compute(&self, bars: &[PriceBar]) -> Result<Vec<SwingPoint>, SwingError> {
        compute_swing_points(bars, self.strength)
    }
}
