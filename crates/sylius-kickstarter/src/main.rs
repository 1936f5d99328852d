//! Sylius Plugin Kickstarter - Install the plugin skeleton and make it yours

use anyhow::Result;
use clap::{Args as ClapArgs, CommandFactory, FromArgMatches, Parser, Subcommand};
use kickstarter_core::{InstallOptions, SkeletonConfig, SyliusPlugin};

/// Name of the install command, also run when no command is given
const NEW_PLUGIN: &str = "new:plugin";

#[derive(Parser, Debug)]
#[command(name = "sylius-kickstarter")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the default `new:plugin` command
    #[command(flatten)]
    pub new_plugin: NewPluginArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = NEW_PLUGIN)]
    NewPlugin(NewPluginArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct NewPluginArgs {
    /// Package name (<vendor>/<name>), e.g. iron-man/sylius-product-on-demand-plugin
    #[arg(short, long = "package-name")]
    pub package_name: Option<String>,

    /// Description written to composer.json
    #[arg(short, long)]
    pub description: Option<String>,

    /// Author (Jane Doe <jane.doe@sylius.com>), or n to skip
    #[arg(short, long)]
    pub author: Option<String>,

    /// License written to composer.json
    #[arg(short, long)]
    pub license: Option<String>,

    /// Install even if the plugin folder already exists
    #[arg(short, long)]
    pub force: bool,

    /// Do not ask any interactive question
    #[arg(short = 'n', long = "no-interaction")]
    pub no_interaction: bool,

    /// Disable ANSI output of composer
    #[arg(long = "no-ansi")]
    pub no_ansi: bool,

    /// Do not output any message from composer
    #[arg(short, long)]
    pub quiet: bool,
}

impl From<NewPluginArgs> for InstallOptions {
    fn from(args: NewPluginArgs) -> Self {
        InstallOptions {
            package_name: args.package_name,
            description: args.description,
            author: args.author,
            license: args.license,
            force: args.force,
            no_interaction: args.no_interaction,
            no_ansi: args.no_ansi,
            quiet: args.quiet,
        }
    }
}

/// Parse the command line, with help texts taken from the product
fn parse_args<C: SkeletonConfig>(config: &C) -> Args {
    let matches = Args::command()
        .about(config.cli_description())
        .mut_subcommand(NEW_PLUGIN, |cmd| cmd.about(config.cli_description()))
        .get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = SyliusPlugin;
    let args = parse_args(&config);
    let options = match args.command {
        Some(Command::NewPlugin(new_plugin)) => new_plugin,
        // No subcommand provided, default to new:plugin
        None => args.new_plugin,
    };

    let result = kickstarter_core::run(&config, options.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
