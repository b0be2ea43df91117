//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# ClimaSim Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[globe]
# detail = "ultra"            # low | medium | high | ultra
# radius = 1.2                # > 0
# atmosphere_radius = 1.35    # must exceed radius
# atmosphere_detail = "medium"
# atmosphere_pass = true
# rotation_speed = 8.0        # degrees per second, -360..360
# welcome_brightness = 0.7    # 0.0-1.0

[textures]
# asset_dir = "assets/textures"
# day = "earth_day.jpg"       # empty string = always synthesize
# night = "earth_night.jpg"
# clouds = "earth_clouds.png"
# normal = "earth_normal.jpg"
# specular = "earth_specular.jpg"
# bathymetry = "earth_bathymetry.jpeg"
# vegetation = "earth_vegetation.jpeg"
# seed = 12655198
# synth_resolution = 512      # power of two, 16-4096
# write_back = false

[palette]
# ocean = "#1a4d99"
# ice = "#e6f2ff"
# city_lights = "#ffcc66"
# sun = "#fff2cc"
# ambient = "#1a264d"

[climate]
# start_year = 2024           # 1900-2100
# issue_intensity = 0.5       # 0.0-1.0
# year_step = 5               # 1-50

[window]
# title = "ClimaSim"
# width = 1280
# height = 800

[logging]
# level = "info"
"##
    .to_string()
}
