// THEORY:
// The `Pixel` module is the most fundamental unit of the analysis engine. It is a
// "dumb" data container for a single RGBA pixel plus the one heuristic the whole
// engine is built on: perceptual luminance.
//
// Luminance here is the Rec. 601 luma approximation on the raw 0..255 channel
// values, with no gamma correction and no alpha weighting. Alpha is carried so a
// pixel can be written back out unchanged, but it never takes part in the math.
//
// Anything that needs more than one pixel (neighborhood means, frame-wide maxima)
// belongs in the higher-level modules (`luminance_scanner`, `neighborhood`).

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Luminance = f64;

    /// Bytes per pixel in every frame buffer the engine consumes (R, G, B, A).
    pub const CHANNELS: usize = 4;

    /// Rec. 601 luma weights.
    pub const RED_WEIGHT: Luminance = 0.299;
    pub const GREEN_WEIGHT: Luminance = 0.587;
    pub const BLUE_WEIGHT: Luminance = 0.114;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255). Never read by the heuristics.
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Luminance estimate (Rec. 601 luma) on a 0..255 scale.
        pub fn luminance(&self) -> Luminance {
            luminance_of(self.red, self.green, self.blue)
        }
    }

    /// Luminance of raw channel bytes, for loops that walk a buffer without building pixels.
    #[inline]
    pub fn luminance_of(red: Channel, green: Channel, blue: Channel) -> Luminance {
        RED_WEIGHT * red as Luminance
            + GREEN_WEIGHT * green as Luminance
            + BLUE_WEIGHT * blue as Luminance
    }
}
