use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use keyshare_core::service::UserId;
use keyshare_core::{GroupName, GroupReference, VERSION};

use crate::helpers::{parse_group_name, parse_group_reference, parse_user_id};
use crate::ui::FormatFlag;

const GROUP_REFERENCE_HELP: &str = "Groups are referenced by name. If several of your groups share a name \
you will be asked to pick one. Prefix a value with 'id^' to use a group ID directly, e.g. 'id^b3f1'.";

/// Keyshare - encrypt files to users and groups through a key service
#[derive(Parser)]
#[command(name = "keyshare")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Device credentials file to use instead of the keychain or default keyfile
    #[arg(short, long, global = true, env = "KEYSHARE_KEYFILE", value_name = "PATH")]
    pub keyfile: Option<PathBuf>,

    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = FormatFlag::Auto)]
    pub format: FormatFlag,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols and table borders only
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt, decrypt and share files
    File(FileArgs),

    /// Manage groups you administer or belong to
    Group(GroupArgs),

    /// Look up users and manage this account's devices
    User(UserArgs),

    /// Remove this device's credentials and revoke its keys
    Logout(LogoutArgs),
}

#[derive(Args)]
pub struct FileArgs {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[derive(Subcommand)]
pub enum FileCommand {
    /// Encrypt files; by default each is written next to the source with a '.iron' extension
    Encrypt(EncryptArgs),

    /// Decrypt files; by default each is written without its '.iron' extension
    Decrypt(DecryptArgs),

    /// Grant users and groups access to encrypted files
    #[command(after_help = GROUP_REFERENCE_HELP)]
    Grant(AccessArgs),

    /// Revoke access to encrypted files from users and groups
    #[command(after_help = GROUP_REFERENCE_HELP)]
    Revoke(AccessArgs),

    /// Show who an encrypted file is shared with
    Info(FileInfoArgs),
}

/// Arguments for `file encrypt`
#[derive(Args)]
#[command(after_help = GROUP_REFERENCE_HELP)]
pub struct EncryptArgs {
    /// Files to encrypt
    #[arg(value_name = "FILE", required_unless_present = "stdin", conflicts_with = "stdin")]
    pub files: Vec<PathBuf>,

    /// Users to share with, comma separated
    #[arg(short = 'u', long = "users", value_name = "USER", value_delimiter = ',', value_parser = parse_user_id)]
    pub users: Vec<UserId>,

    /// Groups to share with, comma separated
    #[arg(short = 'g', long = "groups", value_name = "GROUP", value_delimiter = ',', value_parser = parse_group_reference)]
    pub groups: Vec<GroupReference>,

    /// Output file; only with a single input. Use '-' for stdout
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Delete each source file after it was encrypted
    #[arg(short, long)]
    pub delete: bool,

    /// Read the data to encrypt from stdin; requires --out
    #[arg(short, long, requires = "out")]
    pub stdin: bool,
}

/// Arguments for `file decrypt`
#[derive(Args)]
pub struct DecryptArgs {
    /// Encrypted files to decrypt
    #[arg(value_name = "FILE", required_unless_present = "stdin", conflicts_with = "stdin")]
    pub files: Vec<PathBuf>,

    /// Output file; only with a single input. Use '-' for stdout
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Delete each encrypted source file after it was decrypted
    #[arg(short, long)]
    pub delete: bool,

    /// Read the encrypted data from stdin; requires --out
    #[arg(short, long, requires = "out")]
    pub stdin: bool,
}

/// Arguments for `file grant` and `file revoke`
#[derive(Args)]
#[command(group(ArgGroup::new("grantees").required(true).multiple(true).args(["users", "groups"])))]
pub struct AccessArgs {
    /// Encrypted files to change access on
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Users, comma separated
    #[arg(short = 'u', long = "users", value_name = "USER", value_delimiter = ',', value_parser = parse_user_id)]
    pub users: Vec<UserId>,

    /// Groups, comma separated
    #[arg(short = 'g', long = "groups", value_name = "GROUP", value_delimiter = ',', value_parser = parse_group_reference)]
    pub groups: Vec<GroupReference>,
}

/// Arguments for `file info`
#[derive(Args)]
pub struct FileInfoArgs {
    /// Encrypted files to inspect
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// Create a group with you as its first admin and member
    Create(GroupCreateArgs),

    /// List the groups you administer or belong to
    List,

    /// Show a group's details
    #[command(after_help = GROUP_REFERENCE_HELP)]
    Info(GroupTargetArgs),

    /// Rename a group you administer
    #[command(after_help = GROUP_REFERENCE_HELP)]
    Rename(GroupRenameArgs),

    /// Delete a group you administer
    #[command(after_help = GROUP_REFERENCE_HELP)]
    Delete(GroupDeleteArgs),

    /// Add members to a group
    #[command(after_help = GROUP_REFERENCE_HELP)]
    AddMember(GroupUsersArgs),

    /// Remove members from a group
    #[command(after_help = GROUP_REFERENCE_HELP)]
    RemoveMember(GroupUsersArgs),

    /// Add admins to a group
    #[command(after_help = GROUP_REFERENCE_HELP)]
    AddAdmin(GroupUsersArgs),

    /// Remove admins from a group
    #[command(after_help = GROUP_REFERENCE_HELP)]
    RemoveAdmin(GroupUsersArgs),
}

/// Arguments for `group create`
#[derive(Args)]
pub struct GroupCreateArgs {
    /// Name of the new group; may not contain ',' or '^'
    #[arg(value_name = "NAME", value_parser = parse_group_name)]
    pub name: GroupName,
}

#[derive(Args)]
pub struct GroupTargetArgs {
    /// Group name or id^<id>
    #[arg(value_name = "GROUP", value_parser = parse_group_reference)]
    pub group: GroupReference,
}

/// Arguments for `group rename`
#[derive(Args)]
pub struct GroupRenameArgs {
    /// Group name or id^<id>
    #[arg(value_name = "GROUP", value_parser = parse_group_reference)]
    pub group: GroupReference,

    /// New name; may not contain ',' or '^'
    #[arg(value_name = "NEW_NAME", value_parser = parse_group_name)]
    pub new_name: GroupName,
}

/// Arguments for `group delete`
#[derive(Args)]
pub struct GroupDeleteArgs {
    /// Group name or id^<id>
    #[arg(value_name = "GROUP", value_parser = parse_group_reference)]
    pub group: GroupReference,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for member and admin changes
#[derive(Args)]
pub struct GroupUsersArgs {
    /// Group name or id^<id>
    #[arg(value_name = "GROUP", value_parser = parse_group_reference)]
    pub group: GroupReference,

    /// Users, comma separated
    #[arg(short = 'u', long = "users", value_name = "USER", value_delimiter = ',', value_parser = parse_user_id, required = true)]
    pub users: Vec<UserId>,
}

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Check whether users exist and can be shared with
    Lookup(UserLookupArgs),

    /// List this account's devices
    DeviceList,

    /// Delete device keys of this account
    DeviceDelete(DeviceDeleteArgs),

    /// Change the account's private key passphrase
    ChangePassphrase,
}

/// Arguments for `user lookup`
#[derive(Args)]
pub struct UserLookupArgs {
    /// Users, separated by spaces or commas
    #[arg(value_name = "USER", required = true, value_delimiter = ',', value_parser = parse_user_id)]
    pub users: Vec<UserId>,
}

/// Arguments for `user device-delete`
#[derive(Args)]
pub struct DeviceDeleteArgs {
    /// Numeric device IDs, as shown by `keyshare user device-list`
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Arguments for `logout`
#[derive(Args)]
pub struct LogoutArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}
