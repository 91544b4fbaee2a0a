// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Numeric tolerances of the kernel. The defaults are the values every operation uses unless
//! a `*_with` variant receives a custom set. They can be stored in and loaded from a RON file.

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    fs::File,
    path::Path,
};

/// Tolerances used by numerical algorithms of the kernel.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug)]
#[serde(default)]
pub struct Tolerances {
    /// Matrices whose LU determinant has smaller magnitude are treated as singular.
    pub singular_threshold: f64,
    /// Jacobi iterations stop when every off-diagonal entry is smaller than this.
    pub jacobi_epsilon: f64,
    /// Maximum number of Jacobi sweeps.
    pub jacobi_max_sweeps: u32,
    /// Slack for barycentric bounds and the parallel-ray test of ray/triangle intersection.
    pub ray_epsilon: f64,
}

impl Tolerances {
    /// Default tolerances.
    pub const DEFAULT: Self = Self {
        singular_threshold: 1.0e-8,
        jacobi_epsilon: 1.0e-10,
        jacobi_max_sweeps: 32,
        ray_epsilon: 1.0e-5,
    };

    /// Reads tolerances from a RON file. Missing fields take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let tolerances = ron::de::from_reader(file)?;
        crate::info!("Tolerances loaded from {}", path.display());
        Ok(tolerances)
    }

    /// Parses tolerances from a RON string.
    pub fn from_ron_str(str: &str) -> Result<Self, SettingsError> {
        Ok(ron::de::from_str(str)?)
    }

    /// Writes tolerances into a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        ron::ser::to_writer_pretty(file, self, PrettyConfig::default())?;
        crate::info!("Tolerances saved to {}", path.display());
        Ok(())
    }

    /// Serializes tolerances into a pretty RON string.
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Ron(ron::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Ron(e) => write!(f, "ron error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        Self::Ron(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        Self::Ron(e.code)
    }
}

#[cfg(test)]
mod test {
    use super::{SettingsError, Tolerances};

    #[test]
    fn test_default_tolerances() {
        let t = Tolerances::default();
        assert_eq!(t.singular_threshold, 1.0e-8);
        assert_eq!(t.jacobi_epsilon, 1.0e-10);
        assert_eq!(t.jacobi_max_sweeps, 32);
        assert_eq!(t.ray_epsilon, 1.0e-5);
    }

    #[test]
    fn test_partial_ron_takes_defaults() {
        let t = Tolerances::from_ron_str("(jacobi_max_sweeps: 64)").unwrap();
        assert_eq!(t.jacobi_max_sweeps, 64);
        assert_eq!(t.singular_threshold, 1.0e-8);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join("globe_math_settings_save_and_load.ron");
        let t = Tolerances {
            ray_epsilon: 1.0e-6,
            ..Default::default()
        };
        t.save(&path).unwrap();
        assert_eq!(Tolerances::load(&path).unwrap(), t);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            Tolerances::from_ron_str("(singular_threshold: \"x\")"),
            Err(SettingsError::Ron(_))
        ));
        assert!(matches!(
            Tolerances::load("/definitely/not/here.ron"),
            Err(SettingsError::Io(_))
        ));
    }
}
