use chrono::{DateTime, Utc};
use rocket_dyn_templates::handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderErrorReason,
};

use crate::modules::helpers::handelbars::format_position::check_param_count;

#[derive(Clone, Copy)]
pub struct FormatDateHelper;

impl HelperDef for FormatDateHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper, _: &Handlebars, _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output) -> HelperResult {

        check_param_count(h, 1)?;
        let date_param = h.param(0);

        if date_param.is_none() {
            return Ok(());
        }

        let date: DateTime<Utc> = match date_param.map(|p| serde_json::from_value(p.value().clone())) {
            Some(Ok(date)) => date,
            _ => return Err(RenderErrorReason::InvalidParamType("utc date").into()),
        };
        out.write(&format!("{}", date.format("%a %e %B %Y, %H:%M UTC")))?;

        Ok(())
    }
}
