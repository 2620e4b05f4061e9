use kal_ipc::OsFamily;
use kal_ui::Bootstrap;

/// Settings the commands run with.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub os: OsFamily,
    pub log_level: Option<String>,
    pub host_program: Option<String>,
    pub host_args: Vec<String>,
    pub bootstrap: Bootstrap,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        let general = &self.bootstrap.config.general;
        let appearance = &self.bootstrap.config.appearance;

        println!("Effective configuration:");
        println!("  OS family: {}", os_name(self.os));
        println!(
            "  Log level: {}",
            self.log_level.as_deref().unwrap_or("(default)")
        );
        match &self.host_program {
            Some(program) if self.host_args.is_empty() => println!("  Host: {program}"),
            Some(program) => println!("  Host: {program} {}", self.host_args.join(" ")),
            None => println!("  Host: (none, commands are journalled)"),
        }
        println!("  Hotkey: {}", general.hotkey);
        println!(
            "  Tab through actions: {}",
            bool_to_word(general.tab_through_action_buttons)
        );
        println!("  Max results: {}", general.max_results);
        println!(
            "  Window: {}px wide, input {}px, rows {}px + {}px gap, {} visible",
            appearance.window_width,
            appearance.input_height,
            appearance.item_height,
            appearance.item_gap,
            appearance.max_items
        );
        println!("  Transparent: {}", bool_to_word(appearance.transparent));
        println!("  Shadows: {}", bool_to_word(appearance.shadows));
        println!(
            "  Custom CSS: {}",
            bool_to_word(self.bootstrap.custom_css.is_some())
        );
        println!(
            "  Accent colour: {}",
            bool_to_word(self.bootstrap.accent_color.is_some())
        );
    }
}

fn os_name(os: OsFamily) -> &'static str {
    match os {
        OsFamily::Windows => "windows",
        OsFamily::Unix => "unix",
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
