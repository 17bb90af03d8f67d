use log::{info, error};
use chrono::{DateTime, Utc};

/// 日志记录工具
pub struct Logger;

impl Logger {
    pub fn log_operation_start(operation: &str, details: &str) {
        info!("🚀 Starting {}: {}", operation, details);
    }

    pub fn log_operation_success(operation: &str, details: &str) {
        info!("✅ {} completed successfully: {}", operation, details);
    }

    pub fn log_operation_failure(operation: &str, error: &str) {
        error!("❌ {} failed: {}", operation, error);
    }

    pub fn log_debt_saved(name: &str, total: f64, paid: f64, percentage: u32) {
        info!(
            "💰 Debt Saved: {} | total {:.2} | paid {:.2} | share {}%",
            name, total, paid, percentage
        );
    }

    pub fn log_repayment(chat_id: i64, title: &str, amount: &str) {
        info!("🎉 Repayment: Chat={} {} {}", chat_id, title, amount);
    }

    pub fn log_spark(chat_id: i64, spark_id: &str, action: &str) {
        info!("✨ Spark {}: Chat={} ID={}", action, chat_id, spark_id);
    }
}

/// 格式化工具
pub struct Formatter;

impl Formatter {
    /// 金额显示，千位分隔，最多三位小数："¥2,000"、"¥1,234.5"
    pub fn format_yuan(amount: f64) -> String {
        let fixed = format!("{:.3}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if amount < 0.0 { "-" } else { "" };
        if frac_part.is_empty() {
            format!("¥{sign}{grouped}")
        } else {
            format!("¥{sign}{grouped}.{frac_part}")
        }
    }

    /// 相对时间标签："刚刚"、"15分钟前"、"昨天"
    pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(then);

        if elapsed.num_minutes() < 1 {
            "刚刚".to_string()
        } else if elapsed.num_hours() < 1 {
            format!("{}分钟前", elapsed.num_minutes())
        } else if elapsed.num_days() < 1 {
            format!("{}小时前", elapsed.num_hours())
        } else if elapsed.num_days() == 1 {
            "昨天".to_string()
        } else {
            format!("{}天前", elapsed.num_days())
        }
    }
}
