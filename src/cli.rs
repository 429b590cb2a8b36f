use anyhow::{anyhow, bail, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = CliArgs::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            if !flag.starts_with("--") {
                bail!("Unexpected argument '{flag}'. Use --script/--config with values.");
            }
            let key = &flag[2..];
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?
                .as_ref()
                .to_string();
            match key {
                "script" => parsed.script = Some(PathBuf::from(value)),
                "config" => parsed.config = Some(PathBuf::from(value)),
                _ => bail!("Unknown flag '{flag}'. Supported flags: --script, --config."),
            }
        }
        Ok(parsed)
    }

    pub fn script_path(&self) -> Result<&PathBuf> {
        self.script.as_ref().ok_or_else(|| anyhow!("Missing required flag --script <path>"))
    }
}
