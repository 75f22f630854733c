use rocket_dyn_templates::handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};

/// # classified position formatting helper
/// drivers without a classified position get a letter from the api, this writes it out
///
/// ### usage
/// ```handlebars
/// {{formatPosition "1"}}
/// {{formatPosition "R"}}
/// ```
///
/// ### output
/// ```text
/// 1
/// Retired
/// ```
#[derive(Clone, Copy)]
pub struct FormatPosition;

impl HelperDef for FormatPosition {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        check_param_count(helper, 1)?;
        let position = match helper.param(0).and_then(|p| p.value().as_str()) {
            Some(p) => p,
            None => return Err(RenderErrorReason::InvalidParamType("string").into()),
        };

        out.write(describe_position(position))?;
        Ok(())
    }
}

pub fn describe_position(position: &str) -> &str {
    match position {
        "R" => "Retired",
        "D" => "Disqualified",
        "E" => "Excluded",
        "W" => "Withdrawn",
        "F" => "Did not qualify",
        "N" => "Not classified",
        p => p,
    }
}

pub fn check_param_count(h: &Helper, n: u64) -> Result<(), RenderError> {
    if h.params().len() != n as usize {
        return Err(RenderErrorReason::Other(format!(
            "Wrong number of arguments for helper \"{}\", {n} was expected but {} were given",
            h.name(),
            h.params().len()
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_out_letters() {
        let mut hbs = Handlebars::new();
        hbs.register_helper("formatPosition", Box::new(FormatPosition));

        let rendered = hbs
            .render_template("{{formatPosition a}} {{formatPosition b}}", &json!({"a": "3", "b": "D"}))
            .unwrap();
        assert_eq!(rendered, "3 Disqualified");
    }

    #[test]
    fn wrong_argument_count_fails() {
        let mut hbs = Handlebars::new();
        hbs.register_helper("formatPosition", Box::new(FormatPosition));

        assert!(hbs.render_template("{{formatPosition a a}}", &json!({"a": "3"})).is_err());
    }
}
