use clap::{Args, Subcommand};

use tillpoint::members;
use tillpoint_app::{api::SalesApi, api::models::NewMember, lookup};

#[derive(Debug, Args)]
pub(crate) struct MemberCommand {
    #[command(subcommand)]
    command: MemberSubcommand,
}

#[derive(Debug, Subcommand)]
enum MemberSubcommand {
    /// Register a new member
    Register(RegisterArgs),
    /// Show the discount rate a phone would receive at checkout
    Rate(RateArgs),
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Member name
    #[arg(long)]
    name: String,

    /// 10-digit member phone
    #[arg(long)]
    phone: String,
}

#[derive(Debug, Args)]
struct RateArgs {
    /// 10-digit member phone
    phone: String,
}

pub(crate) async fn run(command: MemberCommand, api: &dyn SalesApi) -> Result<(), String> {
    match command.command {
        MemberSubcommand::Register(args) => register(args, api).await,
        MemberSubcommand::Rate(args) => rate(args, api).await,
    }
}

async fn register(args: RegisterArgs, api: &dyn SalesApi) -> Result<(), String> {
    members::validate_phone(&args.phone).map_err(|error| error.to_string())?;

    let member = api
        .create_member(NewMember {
            name: args.name,
            phone: args.phone,
        })
        .await
        .map_err(|error| format!("member registration failed: {error}"))?;

    println!("member #{} registered for {}", member.member_id, member.phone);

    Ok(())
}

async fn rate(args: RateArgs, api: &dyn SalesApi) -> Result<(), String> {
    let rate = lookup::resolve_member_rate(api, &args.phone).await;

    println!("checkout discount rate for {}: {rate}%", args.phone);

    Ok(())
}
