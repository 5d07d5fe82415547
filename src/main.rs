// SPDX-License-Identifier: MPL-2.0
use iced_folio::app::{self, Flags};
use std::path::PathBuf;

const HELP: &str = "\
iced_folio - adaptive media gallery

USAGE:
  iced_folio [OPTIONS] [MANIFEST]

OPTIONS:
  -h, --help            Print this help
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  --no-lazy             Load every thumbnail immediately
  --fixed-layout        Use the configured grid instead of adapting to content
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let no_lazy = args.contains("--no-lazy");
    let fixed_layout = args.contains("--fixed-layout");
    let manifest_path = args.finish().into_iter().next().map(PathBuf::from);

    Ok(Some(Flags {
        lang,
        manifest_path,
        no_lazy,
        fixed_layout,
        config_dir,
    }))
}

fn main() -> iced::Result {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("[ERROR] {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };
    app::run(flags)
}
