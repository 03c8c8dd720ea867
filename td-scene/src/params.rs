//! Named scalar parameters the UI and the animation tick write to.

use std::ops::RangeInclusive;

use crate::config::SceneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    DoorAngleLeft,
    DoorAngleRight,
    HandleAngleLeft,
    HandleAngleRight,
    GlassAngleLeft,
    GlassAngleRight,
    CameraRotationX,
    CameraRotationY,
    CameraRotationZ,
    Zoom,
    LightPositionX,
    LightPositionY,
    LightPositionZ,
    AmbientR,
    AmbientG,
    AmbientB,
    DiffuseR,
    DiffuseG,
    DiffuseB,
    SpecularR,
    SpecularG,
    SpecularB,
    Shininess,
}

impl ParamId {
    pub const COUNT: usize = 23;

    pub const ALL: [Self; Self::COUNT] = [
        Self::DoorAngleLeft,
        Self::DoorAngleRight,
        Self::HandleAngleLeft,
        Self::HandleAngleRight,
        Self::GlassAngleLeft,
        Self::GlassAngleRight,
        Self::CameraRotationX,
        Self::CameraRotationY,
        Self::CameraRotationZ,
        Self::Zoom,
        Self::LightPositionX,
        Self::LightPositionY,
        Self::LightPositionZ,
        Self::AmbientR,
        Self::AmbientG,
        Self::AmbientB,
        Self::DiffuseR,
        Self::DiffuseG,
        Self::DiffuseB,
        Self::SpecularR,
        Self::SpecularG,
        Self::SpecularB,
        Self::Shininess,
    ];

    pub const CAMERA: [Self; 4] = [
        Self::CameraRotationX,
        Self::CameraRotationY,
        Self::CameraRotationZ,
        Self::Zoom,
    ];

    pub const LIGHTING: [Self; 13] = [
        Self::LightPositionX,
        Self::LightPositionY,
        Self::LightPositionZ,
        Self::AmbientR,
        Self::AmbientG,
        Self::AmbientB,
        Self::DiffuseR,
        Self::DiffuseG,
        Self::DiffuseB,
        Self::SpecularR,
        Self::SpecularG,
        Self::SpecularB,
        Self::Shininess,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::DoorAngleLeft => "doorAngleLeft",
            Self::DoorAngleRight => "doorAngleRight",
            Self::HandleAngleLeft => "handleAngleLeft",
            Self::HandleAngleRight => "handleAngleRight",
            Self::GlassAngleLeft => "glassAngleLeft",
            Self::GlassAngleRight => "glassAngleRight",
            Self::CameraRotationX => "rotationX",
            Self::CameraRotationY => "rotationY",
            Self::CameraRotationZ => "rotationZ",
            Self::Zoom => "zoom",
            Self::LightPositionX => "lightX",
            Self::LightPositionY => "lightY",
            Self::LightPositionZ => "lightZ",
            Self::AmbientR => "ambientR",
            Self::AmbientG => "ambientG",
            Self::AmbientB => "ambientB",
            Self::DiffuseR => "diffuseR",
            Self::DiffuseG => "diffuseG",
            Self::DiffuseB => "diffuseB",
            Self::SpecularR => "specularR",
            Self::SpecularG => "specularG",
            Self::SpecularB => "specularB",
            Self::Shininess => "shininess",
        }
    }

    #[cfg(test)]
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    pub fn spec(self) -> ParamSpec {
        use ParamId::*;
        match self {
            DoorAngleLeft => ParamSpec::new("Left door", 0.0..=90.0, DEGREES),
            DoorAngleRight => ParamSpec::new("Right door", 0.0..=90.0, DEGREES),
            HandleAngleLeft => ParamSpec::new("Left handle", 0.0..=45.0, DEGREES),
            HandleAngleRight => ParamSpec::new("Right handle", 0.0..=45.0, DEGREES),
            GlassAngleLeft => ParamSpec::new("Left glass", 0.0..=60.0, DEGREES),
            GlassAngleRight => ParamSpec::new("Right glass", 0.0..=60.0, DEGREES),
            CameraRotationX => ParamSpec::new("Rotate X", -180.0..=180.0, DEGREES),
            CameraRotationY => ParamSpec::new("Rotate Y", -180.0..=180.0, DEGREES),
            CameraRotationZ => ParamSpec::new("Rotate Z", -180.0..=180.0, DEGREES),
            Zoom => ParamSpec::new("Zoom", 3.0..=30.0, DISTANCE),
            LightPositionX => ParamSpec::new("Light X", -10.0..=10.0, DISTANCE),
            LightPositionY => ParamSpec::new("Light Y", -10.0..=10.0, DISTANCE),
            LightPositionZ => ParamSpec::new("Light Z", -10.0..=10.0, DISTANCE),
            AmbientR => ParamSpec::new("Ambient R", 0.0..=1.0, CHANNEL),
            AmbientG => ParamSpec::new("Ambient G", 0.0..=1.0, CHANNEL),
            AmbientB => ParamSpec::new("Ambient B", 0.0..=1.0, CHANNEL),
            DiffuseR => ParamSpec::new("Diffuse R", 0.0..=1.0, CHANNEL),
            DiffuseG => ParamSpec::new("Diffuse G", 0.0..=1.0, CHANNEL),
            DiffuseB => ParamSpec::new("Diffuse B", 0.0..=1.0, CHANNEL),
            SpecularR => ParamSpec::new("Specular R", 0.0..=1.0, CHANNEL),
            SpecularG => ParamSpec::new("Specular G", 0.0..=1.0, CHANNEL),
            SpecularB => ParamSpec::new("Specular B", 0.0..=1.0, CHANNEL),
            Shininess => ParamSpec::new("Shininess", 1.0..=200.0, WHOLE),
        }
    }
}

/// How a slider shows its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormat {
    pub decimals: usize,
    pub suffix: &'static str,
}

impl DisplayFormat {
    pub fn format(&self, value: f32) -> String {
        format!("{:.*}{}", self.decimals, value, self.suffix)
    }
}

const DEGREES: DisplayFormat = DisplayFormat {
    decimals: 0,
    suffix: "°",
};
const DISTANCE: DisplayFormat = DisplayFormat {
    decimals: 1,
    suffix: "",
};
const CHANNEL: DisplayFormat = DisplayFormat {
    decimals: 2,
    suffix: "",
};
const WHOLE: DisplayFormat = DisplayFormat {
    decimals: 0,
    suffix: "",
};

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub label: &'static str,
    pub range: Option<RangeInclusive<f32>>,
    pub format: DisplayFormat,
}

impl ParamSpec {
    const fn new(label: &'static str, range: RangeInclusive<f32>, format: DisplayFormat) -> Self {
        Self {
            label,
            range: Some(range),
            format,
        }
    }
}

/// Current value of every parameter. Writes are not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTable {
    values: [f32; ParamId::COUNT],
}

impl ParamTable {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut table = Self {
            values: [0.0; ParamId::COUNT],
        };
        for id in ParamId::ALL {
            table.set(id, default_value(id, config));
        }
        table
    }

    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    pub fn set(&mut self, id: ParamId, value: f32) {
        self.values[id.index()] = value;
    }

    pub fn get_mut(&mut self, id: ParamId) -> &mut f32 {
        &mut self.values[id.index()]
    }

    pub fn reset(&mut self, ids: &[ParamId], config: &SceneConfig) {
        for &id in ids {
            self.set(id, default_value(id, config));
        }
    }
}

pub fn default_value(id: ParamId, config: &SceneConfig) -> f32 {
    let light = &config.lighting;
    match id {
        ParamId::Zoom => config.camera.default_zoom,
        ParamId::LightPositionX => light.position[0],
        ParamId::LightPositionY => light.position[1],
        ParamId::LightPositionZ => light.position[2],
        ParamId::AmbientR => light.ambient[0],
        ParamId::AmbientG => light.ambient[1],
        ParamId::AmbientB => light.ambient[2],
        ParamId::DiffuseR => light.diffuse[0],
        ParamId::DiffuseG => light.diffuse[1],
        ParamId::DiffuseB => light.diffuse[2],
        ParamId::SpecularR => light.specular[0],
        ParamId::SpecularG => light.specular[1],
        ParamId::SpecularB => light.specular[2],
        ParamId::Shininess => light.shininess,
        _ => 0.0,
    }
}
