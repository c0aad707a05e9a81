//! Remote execution collaborator seam
//!
//! The credential cache does not speak WinRM itself; it hands a valid
//! `(username, password)` pair to an executor behind this trait. The
//! trait allows testing the credential flow without real servers.

use crate::models::Credentials;
use crate::utils::SessionError;
use serde::{Deserialize, Serialize};

/// Result of one remote command execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandOutput {
    /// Remote process exit status
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Convert to JSON value for response shaping
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

/// Remote command execution over WinRM/PSRemoting
///
/// SECURITY: Implementations MUST NOT log or echo the password and MUST
/// NOT embed it in process arguments visible to other users.
#[async_trait::async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Execute a PowerShell command on the remote host
    async fn execute(
        &self,
        hostname: &str,
        credentials: &Credentials,
        command: &str,
    ) -> Result<CommandOutput, SessionError>;
}

/// Canned PowerShell commands for common host queries
///
/// Compressed JSON output keeps the transport payload small and the
/// response machine-parseable.
pub mod commands {
    /// Basic system information (product name, memory, processors)
    pub const SYSTEM_INFO: &str = "Get-ComputerInfo | Select-Object WindowsProductName, \
         TotalPhysicalMemory, CsProcessors | ConvertTo-Json -Compress";

    /// All currently running services, sorted by name
    pub const RUNNING_SERVICES: &str = "Get-Service | Where-Object {$_.Status -eq 'Running'} | \
         Select-Object Name, Status, StartType | Sort-Object Name | ConvertTo-Json -Compress";

    /// Logical disk sizes and free space in GB
    pub const DISK_SPACE: &str = "Get-WmiObject -Class Win32_LogicalDisk | Select-Object DeviceID, \
         @{Name='Size(GB)';Expression={[math]::Round($_.Size/1GB,2)}}, \
         @{Name='FreeSpace(GB)';Expression={[math]::Round($_.FreeSpace/1GB,2)}} | \
         ConvertTo-Json -Compress";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_serializes() {
        let output = CommandOutput {
            status_code: 0,
            stdout: "{\"WindowsProductName\":\"Windows Server 2022\"}".to_string(),
            stderr: String::new(),
        };
        let value = output.to_value();
        assert_eq!(value["status_code"], 0);
        assert!(value["stdout"].as_str().unwrap().contains("Server 2022"));
    }

    #[test]
    fn test_canned_commands_emit_compressed_json() {
        for cmd in [
            commands::SYSTEM_INFO,
            commands::RUNNING_SERVICES,
            commands::DISK_SPACE,
        ] {
            assert!(cmd.contains("ConvertTo-Json -Compress"));
        }
    }
}
