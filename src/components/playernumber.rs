//! Player identity component.

use bevy_ecs::prelude::Component;

/// Player number owning an entity.
///
/// Players are numbered from 1. The villain carries [`PlayerNumber::NONE`],
/// props and clues [`PlayerNumber::OBJECT`].
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerNumber(pub i32);

impl PlayerNumber {
    pub const NONE: PlayerNumber = PlayerNumber(-1);
    pub const OBJECT: PlayerNumber = PlayerNumber(0);

    pub fn is_player(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_not_a_player() {
        assert!(!PlayerNumber::NONE.is_player());
        assert!(!PlayerNumber::OBJECT.is_player());
        assert!(PlayerNumber(1).is_player());
    }
}
