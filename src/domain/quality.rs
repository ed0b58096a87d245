//! Construction quality and category codes.
//!
//! Every rating is a small tagged enum with an explicit `code()`. The code is what
//! the model sees and what CSV / JSON carry; variant names exist for readability.
//! Cement grade is the one category whose code is the raw grade number (43 / 53)
//! rather than a 0-based ordinal; `features::quality` owns how that is normalized.

use serde::{Deserialize, Serialize};

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal { $($variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(format!("unknown {} code {other}", $label)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }
    };
}

coded_enum! {
    /// Timber used for doors and frames.
    WoodQuality, "wood quality" { Low = 0, Medium = 1, High = 2 }
}

coded_enum! {
    /// Ordinary Portland cement grade; the code is the grade itself.
    CementGrade, "cement grade" { Opc43 = 43, Opc53 = 53 }
}

coded_enum! {
    /// Reinforcement steel grade.
    SteelGrade, "steel grade" { Fe415 = 0, Fe500 = 1, Fe550 = 2 }
}

coded_enum! {
    BrickType, "brick type" { Clay = 0, FlyAsh = 1, Aac = 2 }
}

coded_enum! {
    FlooringQuality, "flooring quality" { Basic = 0, Standard = 1, Premium = 2 }
}

coded_enum! {
    PaintQuality, "paint quality" { Basic = 0, Standard = 1, Premium = 2 }
}

coded_enum! {
    PlumbingQuality, "plumbing quality" { Basic = 0, Standard = 1, Premium = 2 }
}

coded_enum! {
    ElectricalQuality, "electrical quality" { Basic = 0, Standard = 1, Premium = 2 }
}

coded_enum! {
    RoofingType, "roofing type" { Sheet = 0, Tiled = 1, Rcc = 2 }
}

coded_enum! {
    WindowGlassQuality, "window glass quality" { Plain = 0, Toughened = 1, Laminated = 2 }
}

coded_enum! {
    /// How the listed floor area was measured.
    AreaType, "area type" { SuperBuiltUp = 0, BuiltUp = 1, Carpet = 2, Plot = 3 }
}

/// The ten rated categories, in feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityCategory {
    Wood,
    CementGrade,
    SteelGrade,
    BrickType,
    Flooring,
    Paint,
    Plumbing,
    Electrical,
    Roofing,
    WindowGlass,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 10] = [
        QualityCategory::Wood,
        QualityCategory::CementGrade,
        QualityCategory::SteelGrade,
        QualityCategory::BrickType,
        QualityCategory::Flooring,
        QualityCategory::Paint,
        QualityCategory::Plumbing,
        QualityCategory::Electrical,
        QualityCategory::Roofing,
        QualityCategory::WindowGlass,
    ];

    /// Column / feature name.
    pub fn column(self) -> &'static str {
        match self {
            QualityCategory::Wood => "wood",
            QualityCategory::CementGrade => "cement_grade",
            QualityCategory::SteelGrade => "steel_grade",
            QualityCategory::BrickType => "brick_type",
            QualityCategory::Flooring => "flooring",
            QualityCategory::Paint => "paint",
            QualityCategory::Plumbing => "plumbing",
            QualityCategory::Electrical => "electrical",
            QualityCategory::Roofing => "roofing",
            QualityCategory::WindowGlass => "window_glass",
        }
    }
}

/// The ten quality ratings of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRatings {
    pub wood: WoodQuality,
    pub cement_grade: CementGrade,
    pub steel_grade: SteelGrade,
    pub brick_type: BrickType,
    pub flooring: FlooringQuality,
    pub paint: PaintQuality,
    pub plumbing: PlumbingQuality,
    pub electrical: ElectricalQuality,
    pub roofing: RoofingType,
    pub window_glass: WindowGlassQuality,
}

impl QualityRatings {
    /// Lowest code in every category (cement grade 43).
    pub fn lowest() -> Self {
        Self {
            wood: WoodQuality::Low,
            cement_grade: CementGrade::Opc43,
            steel_grade: SteelGrade::Fe415,
            brick_type: BrickType::Clay,
            flooring: FlooringQuality::Basic,
            paint: PaintQuality::Basic,
            plumbing: PlumbingQuality::Basic,
            electrical: ElectricalQuality::Basic,
            roofing: RoofingType::Sheet,
            window_glass: WindowGlassQuality::Plain,
        }
    }

    /// Highest code in every category (cement grade 53).
    pub fn highest() -> Self {
        Self {
            wood: WoodQuality::High,
            cement_grade: CementGrade::Opc53,
            steel_grade: SteelGrade::Fe550,
            brick_type: BrickType::Aac,
            flooring: FlooringQuality::Premium,
            paint: PaintQuality::Premium,
            plumbing: PlumbingQuality::Premium,
            electrical: ElectricalQuality::Premium,
            roofing: RoofingType::Rcc,
            window_glass: WindowGlassQuality::Laminated,
        }
    }

    /// Raw code per category, in `QualityCategory::ALL` order.
    pub fn codes(&self) -> [(QualityCategory, u8); 10] {
        [
            (QualityCategory::Wood, self.wood.code()),
            (QualityCategory::CementGrade, self.cement_grade.code()),
            (QualityCategory::SteelGrade, self.steel_grade.code()),
            (QualityCategory::BrickType, self.brick_type.code()),
            (QualityCategory::Flooring, self.flooring.code()),
            (QualityCategory::Paint, self.paint.code()),
            (QualityCategory::Plumbing, self.plumbing.code()),
            (QualityCategory::Electrical, self.electrical.code()),
            (QualityCategory::Roofing, self.roofing.code()),
            (QualityCategory::WindowGlass, self.window_glass.code()),
        ]
    }
}
