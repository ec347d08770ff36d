use crate::domain::constants::DEFAULT_CONTROLLER;
use clap::{ArgGroup, Args, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cgx-tagger",
    version,
    about = "Add or remove tags on CloudGenix sites, elements, interfaces and circuit categories"
)]
#[command(group(ArgGroup::new("action").required(true).args(["add", "remove"])))]
pub struct Cli {
    #[arg(short = 'A', long, help_heading = "Action")]
    pub add: bool,
    #[arg(short = 'R', long, help_heading = "Action")]
    pub remove: bool,
    #[arg(
        short = 'S',
        long,
        help_heading = "Action",
        help = "Simulate and display prospective changes. Don't make any actual modifications"
    )]
    pub simulate: bool,
    #[arg(short = 'T', long, help_heading = "Action", help = "Tag to add or remove from objects")]
    pub tag: String,
    #[arg(
        short = 'O',
        long,
        help_heading = "Action",
        help = "Object to add/remove tags from. One of sites, elements, interfaces, circuitcategories"
    )]
    pub object: String,
    #[arg(
        short = 'K',
        long,
        default_value = "name",
        help_heading = "Action",
        help = "Key in object to use for match"
    )]
    pub key: String,
    #[arg(
        short = 'P',
        long,
        help_heading = "Action",
        help = "REGEX pattern to match object key value with"
    )]
    pub pattern: String,
    #[command(flatten)]
    pub parents: InterfaceFilterArgs,
    #[arg(
        long,
        help_heading = "Action",
        help = "Write CSV to this file instead of printing a table"
    )]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Parent predicates, only consulted for `interfaces`.
#[derive(Args, Debug, Clone)]
pub struct InterfaceFilterArgs {
    #[arg(
        long = "interfaces-site-key",
        visible_alias = "site-key",
        default_value = "name",
        help_heading = "Interfaces",
        help = "Key in site object to use for inclusion"
    )]
    pub site_key: String,
    #[arg(
        long = "interfaces-site-pattern",
        visible_alias = "site-pattern",
        default_value = ".*",
        help_heading = "Interfaces",
        help = "REGEX pattern to match site object with for inclusion"
    )]
    pub site_pattern: String,
    #[arg(
        long = "interfaces-element-key",
        visible_alias = "element-key",
        default_value = "name",
        help_heading = "Interfaces",
        help = "Key in element object to use for inclusion"
    )]
    pub element_key: String,
    #[arg(
        long = "interfaces-element-pattern",
        visible_alias = "element-pattern",
        default_value = ".*",
        help_heading = "Interfaces",
        help = "REGEX pattern to match element object with for inclusion"
    )]
    pub element_pattern: String,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    #[arg(
        short = 'C',
        long,
        default_value = DEFAULT_CONTROLLER,
        help_heading = "API",
        help = "Controller URI"
    )]
    pub controller: String,
    #[arg(
        short = 'E',
        long,
        help_heading = "Login",
        help = "Use this email as user name instead of the settings file or prompting"
    )]
    pub email: Option<String>,
    #[arg(
        long,
        visible_alias = "pw",
        help_heading = "Login",
        help = "Use this password instead of the settings file or prompting"
    )]
    pub password: Option<String>,
    #[arg(short = 'I', long, help_heading = "Login", help = "Do not verify TLS certificates")]
    pub insecure: bool,
    #[arg(long, help_heading = "Login", help = "Ignore region-based redirection")]
    pub noregion: bool,
    #[arg(
        long,
        help_heading = "Login",
        help = "Settings file with auth_token/user/password [default: ./cloudgenix_settings.toml]"
    )]
    pub settings: Option<PathBuf>,
    #[arg(
        short = 'D',
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2),
        help_heading = "Debug",
        help = "Debug output level, 0-2"
    )]
    pub sdkdebug: u8,
    #[arg(
        long,
        default_value_t = 30,
        help_heading = "API",
        help = "Per-request timeout in seconds"
    )]
    pub timeout: u64,
}
