//! Climate issues as data: each issue is a fixed list of parameter effects
//! scaled by intensity.

use climasim_common::IssueKind;
use tracing::{debug, warn};

use super::state::{lerp3, ClimateVisualState};

/// A scalar parameter an issue can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarParam {
    AtmosphereBaseline,
    SunIntensity,
    TemperatureChange,
    IceCapReduction,
    IceCapIntensity,
    OceanSpecular,
    OceanAcidification,
    VegetationDensity,
    Desertification,
    ForestLoss,
    PollutionLevel,
}

/// A colour parameter an issue can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParam {
    IceColor,
    OceanColor,
    CityLightColor,
    Scattering,
}

/// One rule, applied with intensity `i` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// `value += k * i`
    Add(ScalarParam, f32),
    /// `value *= 1 + k * i`
    Scale(ScalarParam, f32),
    /// `color *= 1 + k * i`
    ScaleColor(ColorParam, f32),
    /// `color = lerp(color, target, k * i)`
    Blend(ColorParam, [f32; 3], f32),
}

/// The effects of `kind`, one rule per parameter.
pub fn issue_effects(kind: IssueKind) -> &'static [Effect] {
    use ColorParam as C;
    use Effect::*;
    use ScalarParam as S;

    match kind {
        IssueKind::GlobalWarming => &[
            Add(S::AtmosphereBaseline, 0.2),
            Add(S::SunIntensity, 0.5),
            Blend(C::IceColor, [0.7, 0.8, 0.9], 0.5),
            Add(S::TemperatureChange, 2.0),
            Add(S::IceCapReduction, 0.5),
        ],
        IssueKind::OceanAcidification => &[
            Blend(C::OceanColor, [0.3, 0.2, 0.4], 0.4),
            Scale(S::OceanSpecular, -0.3),
            Add(S::OceanAcidification, 0.8),
        ],
        IssueKind::Deforestation => &[
            Scale(S::VegetationDensity, -0.6),
            Add(S::Desertification, 0.5),
            Add(S::ForestLoss, 0.6),
        ],
        IssueKind::IceMelting => &[
            Scale(S::IceCapIntensity, -0.8),
            Add(S::IceCapReduction, 0.7),
        ],
        IssueKind::Pollution => &[
            Add(S::AtmosphereBaseline, 0.3),
            ScaleColor(C::Scattering, 0.5),
            Blend(C::CityLightColor, [0.8, 0.6, 0.4], 0.4),
            Add(S::PollutionLevel, 0.9),
        ],
    }
}

impl ClimateVisualState {
    /// Apply an issue by id. Unknown ids are logged and ignored; returns
    /// whether anything was applied.
    pub fn apply_issue(&mut self, id: &str, intensity: f32) -> bool {
        match id.parse::<IssueKind>() {
            Ok(kind) => {
                self.apply_issue_kind(kind, intensity);
                true
            }
            Err(e) => {
                warn!("{e}, ignoring");
                false
            }
        }
    }

    /// Apply `kind` at `intensity` (clamped to `[0, 1]`). Effects stack.
    pub fn apply_issue_kind(&mut self, kind: IssueKind, intensity: f32) {
        let i = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if i != intensity {
            warn!(intensity, clamped = i, "issue intensity out of range");
        }

        for effect in issue_effects(kind) {
            match *effect {
                Effect::Add(param, k) => *self.scalar_mut(param) += k * i,
                Effect::Scale(param, k) => *self.scalar_mut(param) *= 1.0 + k * i,
                Effect::ScaleColor(param, k) => {
                    for c in self.color_mut(param).iter_mut() {
                        *c *= 1.0 + k * i;
                    }
                }
                Effect::Blend(param, target, k) => {
                    let color = self.color_mut(param);
                    *color = lerp3(*color, target, k * i);
                }
            }
        }

        self.refresh_atmosphere();
        self.clamp_ranges();
        debug!(issue = %kind, intensity = i, "applied climate issue");
    }

    fn scalar_mut(&mut self, param: ScalarParam) -> &mut f32 {
        match param {
            ScalarParam::AtmosphereBaseline => &mut self.atmosphere_baseline,
            ScalarParam::SunIntensity => &mut self.sun_intensity,
            ScalarParam::TemperatureChange => &mut self.temperature_change,
            ScalarParam::IceCapReduction => &mut self.ice_cap_reduction,
            ScalarParam::IceCapIntensity => &mut self.ice_cap_intensity,
            ScalarParam::OceanSpecular => &mut self.ocean_specular,
            ScalarParam::OceanAcidification => &mut self.ocean_acidification,
            ScalarParam::VegetationDensity => &mut self.vegetation_density,
            ScalarParam::Desertification => &mut self.desertification,
            ScalarParam::ForestLoss => &mut self.forest_loss,
            ScalarParam::PollutionLevel => &mut self.pollution_level,
        }
    }

    fn color_mut(&mut self, param: ColorParam) -> &mut [f32; 3] {
        match param {
            ColorParam::IceColor => &mut self.ice_color,
            ColorParam::OceanColor => &mut self.ocean_color,
            ColorParam::CityLightColor => &mut self.city_light_color,
            ColorParam::Scattering => &mut self.scattering,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
