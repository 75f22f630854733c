use rocket_dyn_templates::handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderErrorReason,
};

use crate::modules::helpers::handelbars::format_position::check_param_count;
use crate::modules::helpers::math::Math;

/// # lap time formatting helper
/// formats a lap time in milliseconds as `m:ss.fff`
///
/// ### usage
/// ```handlebars
/// {{formatLapTime fastest_lap.lap_time_ms}}
/// ```
#[derive(Clone, Copy)]
pub struct FormatLapTime;

impl HelperDef for FormatLapTime {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        check_param_count(helper, 1)?;

        let ms = match helper.param(0).and_then(|p| p.value().as_u64()) {
            Some(ms) => ms,
            None => return Err(RenderErrorReason::InvalidParamType("milliseconds").into()),
        };

        out.write(&Math::format_lap_time(ms))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_milliseconds() {
        let mut hbs = Handlebars::new();
        hbs.register_helper("formatLapTime", Box::new(FormatLapTime));

        let rendered = hbs.render_template("{{formatLapTime t}}", &json!({"t": 82167})).unwrap();
        assert_eq!(rendered, "1:22.167");
    }
}
