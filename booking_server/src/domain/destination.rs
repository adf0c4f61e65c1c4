use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Room category bookable at a single destination.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RoomType {
    pub slug: &'static str,
    pub label: &'static str,
}

const PATAGONIA_ROOMS: &[RoomType] = &[
    RoomType {
        slug: "geodesica-glaciar",
        label: "Domo Geodésico Glaciar",
    },
    RoomType {
        slug: "bungalow-torres",
        label: "Bungalow Torres del Paine",
    },
    RoomType {
        slug: "suite-patagonica",
        label: "Suite Patagónica",
    },
    RoomType {
        slug: "villa-andina",
        label: "Villa Andina Privada",
    },
];

const RIO_CELESTE_ROOMS: &[RoomType] = &[
    RoomType {
        slug: "geodesica-volcan",
        label: "Domo Geodésico Volcánico",
    },
    RoomType {
        slug: "bungalow-termal",
        label: "Bungalow Termal",
    },
    RoomType {
        slug: "suite-canopy",
        label: "Suite Canopy",
    },
    RoomType {
        slug: "villa-celeste",
        label: "Villa Río Celeste",
    },
];

// The two supported destinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Destination {
    #[default]
    Patagonia,
    RioCeleste,
}

impl Destination {
    pub const ALL: [Destination; 2] = [Destination::Patagonia, Destination::RioCeleste];

    // Resolve a form/URL slug; tolerant of case and surrounding whitespace.
    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|destination| destination.slug().eq_ignore_ascii_case(value))
    }

    pub fn slug(self) -> &'static str {
        match self {
            Destination::Patagonia => "patagonia",
            Destination::RioCeleste => "rio-celeste",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Destination::Patagonia => "Patagonia Glaciar",
            Destination::RioCeleste => "Río Celeste Volcánico",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Destination::Patagonia => "Glaciares, Torres del Paine y lujo carbononeutral",
            Destination::RioCeleste => "Volcanes, termales y canopy eco-sostenible",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Destination::Patagonia => Destination::RioCeleste,
            Destination::RioCeleste => Destination::Patagonia,
        }
    }

    pub fn rooms(self) -> &'static [RoomType] {
        match self {
            Destination::Patagonia => PATAGONIA_ROOMS,
            Destination::RioCeleste => RIO_CELESTE_ROOMS,
        }
    }

    // Only this destination's own catalog is searched.
    pub fn room(self, slug: &str) -> Option<&'static RoomType> {
        let slug = slug.trim();
        self.rooms().iter().find(|room| room.slug == slug)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Destination::from_slug(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown destination `{value}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_slug_has_mixed_case_and_padding_then_destination_resolves() {
        assert_eq!(
            Destination::from_slug("  Rio-Celeste "),
            Some(Destination::RioCeleste)
        );
        assert_eq!(Destination::from_slug("patagonia"), Some(Destination::Patagonia));
        assert_eq!(Destination::from_slug("atacama"), None);
        assert_eq!(Destination::from_slug(""), None);
    }

    #[test]
    fn when_room_belongs_to_other_destination_then_lookup_fails() {
        assert!(Destination::Patagonia.room("villa-andina").is_some());
        assert!(Destination::Patagonia.room("villa-celeste").is_none());
        assert!(Destination::RioCeleste.room("suite-canopy").is_some());
        assert!(Destination::RioCeleste.room("suite-patagonica").is_none());
    }

    #[test]
    fn room_catalogs_do_not_overlap() {
        for room in Destination::Patagonia.rooms() {
            assert!(Destination::RioCeleste.room(room.slug).is_none());
        }
    }

    #[test]
    fn other_flips_between_the_two_destinations() {
        assert_eq!(Destination::Patagonia.other(), Destination::RioCeleste);
        assert_eq!(Destination::RioCeleste.other(), Destination::Patagonia);
    }

    #[test]
    fn destination_serializes_as_slug() {
        let json = serde_json::to_string(&Destination::RioCeleste).expect("serialize");
        assert_eq!(json, "\"rio-celeste\"");

        let parsed: Destination = serde_json::from_str("\"patagonia\"").expect("deserialize");
        assert_eq!(parsed, Destination::Patagonia);
        assert!(serde_json::from_str::<Destination>("\"mars\"").is_err());
    }
}
