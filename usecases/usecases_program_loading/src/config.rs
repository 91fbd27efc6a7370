//! Loader Configuration

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use code_management_class_loading::ArchivePolicy;
use entities_surface::{DisplayGeometry, Size};

/// Placeholder window shown while staging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashConfig {
    pub title: String,
    pub base_width: u32,
    pub base_height: u32,
    pub scale: u32,
}

impl SplashConfig {
    /// Final window size: the base size multiplied by the scale factor
    pub fn size(&self) -> Size {
        Size::new(self.base_width, self.base_height).scaled(self.scale)
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            title: String::from("Loading..."),
            base_width: 320,
            base_height: 240,
            scale: 2,
        }
    }
}

/// Program loader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    pub splash: SplashConfig,
    /// Display the placeholder window is centered on
    pub display: DisplayGeometry,
    pub archive_policy: ArchivePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.splash.size(), Size::new(640, 480));
        assert_eq!(config.splash.title, "Loading...");
        assert_eq!(config.display, DisplayGeometry::new(1920, 1080));
        assert_eq!(config.archive_policy, ArchivePolicy::InitializeAll);
    }
}
