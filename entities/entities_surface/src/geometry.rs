//! Display Geometry
//!
//! Sizes, positions and the primary display used to center the
//! placeholder window.

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

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Width and height in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Multiply both dimensions by `factor`
    pub const fn scaled(self, factor: u32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Top-left corner of a surface, relative to the display origin
///
/// Coordinates are signed: a surface larger than the display is centered
/// at a negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Primary display dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
}

impl DisplayGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Position that centers a surface of `size` on this display
    pub fn center(&self, size: Size) -> Point {
        let x = (i64::from(self.width) - i64::from(size.width)) / 2;
        let y = (i64::from(self.height) - i64::from(size.height)) / 2;
        Point::new(x as i32, y as i32)
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl fmt::Display for DisplayGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error parsing a `WIDTHxHEIGHT` display specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid display geometry `{input}`: expected WIDTHxHEIGHT")]
pub struct GeometryParseError {
    pub input: String,
}

impl FromStr for DisplayGeometry {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GeometryParseError {
            input: s.to_string(),
        };
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
        let width = w.trim().parse::<u32>().map_err(|_| err())?;
        let height = h.trim().parse::<u32>().map_err(|_| err())?;
        if width == 0 || height == 0 {
            return Err(err());
        }
        Ok(Self::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_scaled() {
        assert_eq!(Size::new(320, 240).scaled(2), Size::new(640, 480));
    }

    #[test]
    fn test_center_on_display() {
        let display = DisplayGeometry::new(1920, 1080);
        assert_eq!(display.center(Size::new(640, 480)), Point::new(640, 300));
    }

    #[test]
    fn test_center_surface_larger_than_display() {
        let display = DisplayGeometry::new(600, 400);
        assert_eq!(display.center(Size::new(640, 480)), Point::new(-20, -40));
    }

    #[test]
    fn test_parse_display_geometry() {
        assert_eq!(
            "1280x720".parse::<DisplayGeometry>(),
            Ok(DisplayGeometry::new(1280, 720))
        );
        assert_eq!(
            " 800 X 600 ".parse::<DisplayGeometry>(),
            Ok(DisplayGeometry::new(800, 600))
        );
        assert!("1280".parse::<DisplayGeometry>().is_err());
        assert!("0x720".parse::<DisplayGeometry>().is_err());
        assert!("axb".parse::<DisplayGeometry>().is_err());
    }
}
