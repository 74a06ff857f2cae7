/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Check if the current environment has the external tools downloads rely on
pub async fn check_dependencies(yt_dlp_path: &str, ffmpeg_location: Option<&str>) -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available(yt_dlp_path, "--version").await {
        missing.push(format!("{} - required for every download", yt_dlp_path));
    }

    // A custom location may be a directory, which only yt-dlp knows how to resolve
    if ffmpeg_location.is_none() && !check_command_available("ffmpeg", "-version").await {
        missing.push("ffmpeg - required to convert the downloaded audio".to_string());
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str, version_flag: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg(version_flag)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
        assert_eq!(format_duration(19.9), "19s");
    }

    #[tokio::test]
    async fn test_missing_tool_is_listed() {
        let missing = check_dependencies("no-such-yt-dlp-here", Some("/opt/ffmpeg")).await;
        assert_eq!(missing, vec!["no-such-yt-dlp-here - required for every download".to_string()]);
    }
}
