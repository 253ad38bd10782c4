//! Plain-text views of the client state

use std::fmt::Write;
use std::io::{self, BufRead};

use asset_client::{Banner, Device, HistoryEntry, User};
use shared::query::DeviceStats;

pub fn devices(devices: &[&Device]) -> String {
    if devices.is_empty() {
        return "Không có thiết bị.\n".to_string();
    }
    let mut out = String::new();
    for d in devices {
        let _ = write!(out, "{:<10} {:<10} {:<28} {:<12}", d.tag_id, d.status.as_str(), d.name, d.kind);
        if let Some(holder) = &d.assigned_to {
            let _ = write!(out, " -> {holder}");
        }
        out.push('\n');
        if !d.location.is_empty() || !d.configuration.is_empty() {
            let _ = writeln!(out, "{:<10} {} | {}", "", d.location, d.configuration);
        }
    }
    out
}

pub fn users(users: &[&User]) -> String {
    if users.is_empty() {
        return "Không có nhân sự.\n".to_string();
    }
    users.iter().fold(String::new(), |mut out, u| {
        let _ = writeln!(out, "{:<10} {:<10} {}", u.employee_id, u.role.as_str(), u.name);
        out
    })
}

pub fn history(entries: &[&HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Chưa có lịch sử.\n".to_string();
    }
    let mut out = String::new();
    for h in entries {
        let _ = write!(
            out,
            "{}  {:<7} {:<10} {}  ({})",
            h.timestamp, h.action.as_str(), h.tag_id, h.device_name, h.performer
        );
        if !h.target.is_empty() {
            let _ = write!(out, " -> {}", h.target);
        }
        out.push('\n');
    }
    out
}

pub fn profile(user: &User) -> String {
    format!(
        "Họ tên: {}\nMã NV: {}\nVai trò: {}\n",
        user.name,
        user.employee_id,
        user.role.as_str()
    )
}

pub fn stats(stats: &DeviceStats) -> String {
    format!(
        "Tổng: {}\nSẵn sàng: {}\nĐang dùng: {}\nChờ xử lý: {}\nSửa chữa: {}\n",
        stats.total, stats.available, stats.assigned, stats.pending, stats.repair
    )
}

pub fn banner(banner: &Banner) -> String {
    match &banner.details {
        Some(details) => format!("{}: {details}", banner.message),
        None => banner.message.clone(),
    }
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` declines
pub fn confirm(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Normalizer, RawRecord};

    #[test]
    fn test_device_line_shows_holder() {
        let list = Normalizer::new().with_now("now").devices(&[RawRecord::new()
            .with("tagid", "IT-002")
            .with("name", "Laptop B")
            .with("status", "ASSIGNED")
            .with("assignedto", "Trần B")]);
        let refs: Vec<&Device> = list.iter().collect();

        let out = devices(&refs);
        assert!(out.starts_with("IT-002"));
        assert!(out.contains("ASSIGNED"));
        assert!(out.contains("-> Trần B"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(devices(&[]), "Không có thiết bị.\n");
        assert_eq!(history(&[]), "Chưa có lịch sử.\n");
    }

    #[test]
    fn test_stats() {
        let out = stats(&DeviceStats {
            total: 3,
            available: 1,
            assigned: 2,
            pending: 0,
            repair: 0,
        });
        assert!(out.starts_with("Tổng: 3\n"));
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner(&Banner::read("HTTP 503")), "Lỗi kết nối: HTTP 503");
    }
}
