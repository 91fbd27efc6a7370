//! Window Handle
//!
//! A cloneable handle onto the placeholder surface. Every clone observes
//! the same state, so the loader and an entry point that receives the
//! window agree on whether it is visible, decorated or disposed.

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
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::geometry::{DisplayGeometry, Point, Size};

/// Surface state errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Decoration can only change while the window is not displayable
    #[error("window `{title}` is displayable; decoration can no longer change")]
    Displayable { title: String },
    /// The window was disposed and cannot be shown again
    #[error("window `{title}` has been disposed")]
    Disposed { title: String },
}

#[derive(Debug, Clone)]
struct WindowState {
    title: String,
    size: Size,
    position: Point,
    decorated: bool,
    visible: bool,
    disposed: bool,
    dispose_count: u32,
}

/// Placeholder window handle
///
/// New windows are hidden and undecorated. Disposal is terminal.
#[derive(Clone)]
pub struct Window {
    state: Arc<RwLock<WindowState>>,
}

impl Window {
    /// Create a hidden, undecorated window
    pub fn new(title: impl Into<String>, size: Size) -> Self {
        Self {
            state: Arc::new(RwLock::new(WindowState {
                title: title.into(),
                size,
                position: Point::default(),
                decorated: false,
                visible: false,
                disposed: false,
                dispose_count: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, WindowState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WindowState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn title(&self) -> String {
        self.read().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.write().title = title.into();
    }

    pub fn size(&self) -> Size {
        self.read().size
    }

    pub fn position(&self) -> Point {
        self.read().position
    }

    pub fn set_position(&self, position: Point) {
        self.write().position = position;
    }

    /// Move the window so it is centered on `display`
    pub fn center_on(&self, display: &DisplayGeometry) {
        let mut state = self.write();
        state.position = display.center(state.size);
    }

    /// Toggle window decorations
    ///
    /// Only allowed before the window is first shown, and never after
    /// disposal.
    pub fn set_decorated(&self, decorated: bool) -> Result<(), SurfaceError> {
        let mut state = self.write();
        if state.disposed {
            return Err(SurfaceError::Disposed {
                title: state.title.clone(),
            });
        }
        if state.visible {
            return Err(SurfaceError::Displayable {
                title: state.title.clone(),
            });
        }
        state.decorated = decorated;
        Ok(())
    }

    pub fn is_decorated(&self) -> bool {
        self.read().decorated
    }

    /// Make the window visible
    pub fn show(&self) -> Result<(), SurfaceError> {
        let mut state = self.write();
        if state.disposed {
            return Err(SurfaceError::Disposed {
                title: state.title.clone(),
            });
        }
        state.visible = true;
        Ok(())
    }

    pub fn hide(&self) {
        self.write().visible = false;
    }

    /// Hide the window and release it
    ///
    /// Returns `true` if this call disposed the window, `false` if it was
    /// already disposed.
    pub fn dispose(&self) -> bool {
        let mut state = self.write();
        if state.disposed {
            return false;
        }
        state.visible = false;
        state.disposed = true;
        state.dispose_count += 1;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.read().visible
    }

    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }

    /// Number of times the window transitioned to disposed (0 or 1)
    pub fn dispose_count(&self) -> u32 {
        self.read().dispose_count
    }

    /// Whether two handles refer to the same window
    pub fn same_window(&self, other: &Window) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Window")
            .field("title", &state.title)
            .field("size", &state.size)
            .field("position", &state.position)
            .field("decorated", &state.decorated)
            .field("visible", &state.visible)
            .field("disposed", &state.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splash() -> Window {
        Window::new("Loading...", Size::new(640, 480))
    }

    #[test]
    fn test_new_window_is_hidden_and_undecorated() {
        let window = splash();
        assert!(!window.is_visible());
        assert!(!window.is_decorated());
        assert!(!window.is_disposed());
        assert_eq!(window.title(), "Loading...");
    }

    #[test]
    fn test_dispose_happens_once() {
        let window = splash();
        window.show().unwrap();
        assert!(window.dispose());
        assert!(!window.dispose());
        assert!(!window.is_visible());
        assert_eq!(window.dispose_count(), 1);
    }

    #[test]
    fn test_disposed_window_cannot_be_shown() {
        let window = splash();
        window.dispose();
        assert!(matches!(window.show(), Err(SurfaceError::Disposed { .. })));
    }

    #[test]
    fn test_decoration_locked_once_visible() {
        let window = splash();
        window.set_decorated(true).unwrap();
        window.show().unwrap();
        assert!(window.is_decorated());
        assert!(matches!(
            window.set_decorated(false),
            Err(SurfaceError::Displayable { .. })
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let window = splash();
        let handle = window.clone();
        handle.show().unwrap();
        assert!(window.is_visible());
        assert!(window.same_window(&handle));
        assert!(!window.same_window(&splash()));
    }

    #[test]
    fn test_center_on_display() {
        let window = splash();
        window.center_on(&DisplayGeometry::new(1920, 1080));
        assert_eq!(window.position(), Point::new(640, 300));
    }
}
