//! Sprite pipeline configuration.

/// Sprite pipeline options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpriteConfig {
    /// Keep selecting sprites past the eighth on a scanline.
    ///
    /// Real hardware stops at eight, which is what causes sprite flicker in
    /// busy scenes. With this set every matching sprite is drawn, while the
    /// overflow flag is still raised on the ninth match so games that poll
    /// it behave the same.
    pub no_sprite_limit: bool,
}
