use serde::{Deserialize, Serialize};

use super::{Direction, Position};
use crate::sys::window_server::WindowId;

/// The main + stack arrangement of one workspace.
///
/// `main` is never part of `others`, `others` holds no duplicates, and
/// `temp_large` always names a member of this layout.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    main: Option<WindowId>,
    others: Vec<WindowId>,
    temp_large: Option<WindowId>,
}

impl Layout {
    pub fn new() -> Self { Self::default() }

    pub fn main(&self) -> Option<WindowId> { self.main }

    pub fn others(&self) -> &[WindowId] { &self.others }

    pub fn temp_large(&self) -> Option<WindowId> { self.temp_large }

    pub fn is_empty(&self) -> bool { self.main.is_none() && self.others.is_empty() }

    pub fn len(&self) -> usize { self.main.iter().count() + self.others.len() }

    /// Main first, then the stack from top to bottom.
    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.main.into_iter().chain(self.others.iter().copied())
    }

    pub fn contains(&self, wid: WindowId) -> bool { self.position_of(wid).is_some() }

    pub fn position_of(&self, wid: WindowId) -> Option<Position> {
        if self.main == Some(wid) {
            return Some(Position::Main);
        }
        self.others.iter().position(|&w| w == wid).map(|idx| Position::Stack(idx + 1))
    }

    /// Adds `wid` as main when the layout has none, otherwise at the bottom
    /// of the stack. Inserting a member again changes nothing.
    pub fn insert(&mut self, wid: WindowId) {
        if self.contains(wid) {
            return;
        }
        if self.main.is_none() {
            self.main = Some(wid);
        } else {
            self.others.push(wid);
        }
    }

    /// Removes `wid` and returns the window that should receive focus in its
    /// place, if any.
    pub fn remove(&mut self, wid: WindowId) -> Option<WindowId> {
        let position = self.position_of(wid)?;
        if self.temp_large == Some(wid) {
            self.temp_large = None;
        }
        match position {
            Position::Main => {
                if self.others.is_empty() {
                    self.main = None;
                } else {
                    self.main = Some(self.others.remove(0));
                }
                self.main
            }
            Position::Stack(i) => {
                self.others.remove(i - 1);
                if self.others.is_empty() {
                    self.main
                } else if i > self.others.len() {
                    self.others.last().copied()
                } else {
                    Some(self.others[i - 1])
                }
            }
        }
    }

    /// Enlarges `wid`, or returns it to normal size if it already is.
    ///
    /// Windows that are not members of this layout are ignored.
    pub fn toggle_enlarge(&mut self, wid: WindowId) {
        if self.temp_large == Some(wid) {
            self.temp_large = None;
        } else if self.contains(wid) {
            self.temp_large = Some(wid);
        }
    }

    /// The window focus moves to when navigating `direction` from `from`.
    pub fn focus_direction(&self, from: Position, direction: Direction) -> Option<WindowId> {
        match (from, direction) {
            (Position::Main, Direction::Left) => self.others.first().copied(),
            (Position::Stack(i), Direction::Right) if self.valid_stack_index(i) => self.main,
            (Position::Stack(i), Direction::Down) if self.valid_stack_index(i) => {
                self.others.get(i).copied()
            }
            (Position::Stack(i), Direction::Up) if i > 1 && self.valid_stack_index(i) => {
                self.others.get(i - 2).copied()
            }
            _ => None,
        }
    }

    /// Moves the window at `from` one step in `direction` by swapping it with
    /// its neighbour, and returns the moved window. Out of range moves are
    /// ignored.
    pub fn move_direction(&mut self, from: Position, direction: Direction) -> Option<WindowId> {
        match (from, direction) {
            (Position::Main, Direction::Left) => {
                let main = self.main?;
                let head = self.others.first_mut()?;
                self.main = Some(std::mem::replace(head, main));
                Some(main)
            }
            (Position::Stack(i), Direction::Right) if self.valid_stack_index(i) => {
                let main = self.main?;
                let moved = std::mem::replace(&mut self.others[i - 1], main);
                self.main = Some(moved);
                Some(moved)
            }
            (Position::Stack(i), Direction::Down) if self.valid_stack_index(i) => {
                if i >= self.others.len() {
                    return None;
                }
                self.others.swap(i - 1, i);
                Some(self.others[i])
            }
            (Position::Stack(i), Direction::Up) if self.valid_stack_index(i) => {
                if i == 1 {
                    return None;
                }
                self.others.swap(i - 1, i - 2);
                Some(self.others[i - 2])
            }
            _ => None,
        }
    }

    fn valid_stack_index(&self, i: usize) -> bool { i >= 1 && i <= self.others.len() }
}
