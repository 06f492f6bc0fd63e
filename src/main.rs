use app::{
    AppHelper, AuthorsCommand, CheckCommand, Command, LenCommand, ListCommand, StripCommand,
};

mod app;

fn main() {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Lptools, a toolbox for logic programs in the Smodels format and CNF formulas.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(LenCommand::new()),
        Box::new(ListCommand::new()),
        Box::new(StripCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app.launch_app();
}
