use thiserror::Error;

/// Tint for a planet's ring. Presence of a `RingStyle` on a body enables ring geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStyle {
    pub color: &'static str,
}

/// Static configuration for one orbiting planet.
///
/// Fields:
/// - `name`: display name, unique among bodies
/// - `size`: visual sphere radius
/// - `distance`: orbit radius around the origin
/// - `speed`: angular rate in radians per second; the sign picks the direction
/// - `color`: `#RRGGBB` fallback used until (or instead of) the texture
/// - `ring`: optional ring tint
/// - `texture_url`: optional surface map, fetched once at startup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalBody {
    pub name: &'static str,
    pub size: f32,
    pub distance: f32,
    pub speed: f32,
    pub color: &'static str,
    pub ring: Option<RingStyle>,
    pub texture_url: Option<&'static str>,
}

/// The sun sits at the origin, glows, and spins with frame delta instead of a fixed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunConfig {
    pub radius: f32,
    pub color: &'static str,
    pub emissive_intensity: f32,
    pub texture_url: Option<&'static str>,
}

pub const SUN: SunConfig = SunConfig {
    radius: 2.5,
    color: "#FDB813",
    emissive_intensity: 3.0,
    texture_url: Some(
        "https://upload.wikimedia.org/wikipedia/commons/thumb/9/99/Map_of_the_full_sun.jpg/1024px-Map_of_the_full_sun.jpg",
    ),
};

pub const SOLAR_SYSTEM: [OrbitalBody; 8] = [
    OrbitalBody {
        name: "Mercury",
        size: 0.4,
        distance: 5.0,
        speed: 1.2,
        color: "#A0522D",
        ring: None,
        texture_url: Some(
            "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c1/Mercury_messanger_globe_cylindrical_projection_ngs.jpg/1024px-Mercury_messanger_globe_cylindrical_projection_ngs.jpg",
        ),
    },
    OrbitalBody {
        name: "Venus",
        size: 0.9,
        distance: 8.0,
        speed: 0.9,
        color: "#DEB887",
        ring: None,
        texture_url: Some(
            "https://upload.wikimedia.org/wikipedia/commons/5/51/Venus_Magellan_C3-MDIR_Global_Mosaic_2048.jpg",
        ),
    },
    OrbitalBody {
        name: "Earth",
        size: 1.0,
        distance: 12.0,
        speed: 0.6,
        color: "#4169E1",
        ring: None,
        texture_url: Some(
            "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c3/Solarsystemscope_texture_2k_earth_daymap.jpg/2048px-Solarsystemscope_texture_2k_earth_daymap.jpg",
        ),
    },
    OrbitalBody {
        name: "Mars",
        size: 0.5,
        distance: 16.0,
        speed: 0.5,
        color: "#CD5C5C",
        ring: None,
        texture_url: Some(
            "https://upload.wikimedia.org/wikipedia/commons/0/02/OSIRIS_Mars_true_color.jpg",
        ),
    },
    OrbitalBody {
        name: "Jupiter",
        size: 2.2,
        distance: 24.0,
        speed: 0.3,
        color: "#DAA520",
        ring: None,
        texture_url: Some("https://upload.wikimedia.org/wikipedia/commons/e/e2/Jupiter.jpg"),
    },
    OrbitalBody {
        name: "Saturn",
        size: 1.8,
        distance: 32.0,
        speed: 0.2,
        color: "#F4A460",
        ring: Some(RingStyle { color: "#C0C0C0" }),
        texture_url: Some(
            "https://upload.wikimedia.org/wikipedia/commons/b/b4/Saturn_%28planet%29_large.jpg",
        ),
    },
    OrbitalBody {
        name: "Uranus",
        size: 1.2,
        distance: 40.0,
        speed: 0.15,
        color: "#87CEEB",
        ring: Some(RingStyle { color: "#E0FFFF" }),
        texture_url: Some("https://upload.wikimedia.org/wikipedia/commons/3/3d/Uranus2.jpg"),
    },
    OrbitalBody {
        name: "Neptune",
        size: 1.1,
        distance: 48.0,
        speed: 0.1,
        color: "#4682B4",
        ring: None,
        texture_url: Some("https://upload.wikimedia.org/wikipedia/commons/5/56/Neptune_Full.jpg"),
    },
];

// Ring geometry relative to the planet radius
pub const RING_INNER_OFFSET: f32 = 0.5;
pub const RING_OUTER_OFFSET: f32 = 2.0;
pub const RING_OPACITY: f32 = 0.5;

// Orbit guide: a thin annulus straddling the orbit radius
pub const ORBIT_GUIDE_HALF_WIDTH: f32 = 0.05;
pub const ORBIT_GUIDE_OPACITY: f32 = 0.1;

impl OrbitalBody {
    /// Inner and outer radius of the ring, if this body has one.
    pub fn ring_radii(&self) -> Option<(f32, f32)> {
        self.ring
            .map(|_| (self.size + RING_INNER_OFFSET, self.size + RING_OUTER_OFFSET))
    }

    pub fn orbit_guide_radii(&self) -> (f32, f32) {
        (
            self.distance - ORBIT_GUIDE_HALF_WIDTH,
            self.distance + ORBIT_GUIDE_HALF_WIDTH,
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("color `{0}` is not of the form #RRGGBB")]
    Malformed(String),
}

/// Linear 0..1 RGB triple parsed from a `#RRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ColorError::Malformed(hex.to_string()))?;
        let mut out = [0.0_f32; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorError::Malformed(hex.to_string()))?;
            *channel = srgb_to_linear(byte as f32 / 255.0);
        }
        Ok(Rgb(out))
    }

    /// Parse, or log and fall back to white. Only the static body table goes through here.
    pub fn from_hex_or_white(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|e| {
            log::warn!("[scene] {}", e);
            Self::WHITE
        })
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
