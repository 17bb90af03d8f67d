use chrono::{DateTime, Utc};

use crate::error::DebtBreakerError;
use crate::feed::models::{Spark, SparkCategory, Victory};
use crate::feed::{RepaymentLog, Wall};
use crate::ledger::models::DebtRecord;
use crate::ledger::DebtLedger;
use crate::utils::Formatter;

pub const WELCOME_TEXT: &str = "欢迎使用 破债者 DebtBreaker！\n打破债务困局，迎接上岸人生。\n\n输入 /help 查看使用方法。";

pub const HELP_TEXT: &str = "DebtBreaker 帮助\n\n支持的命令：\n/start - 开始使用\n/help - 显示帮助\n/debts - 债务结构分析\n/victories - 还款记录\n/wall [story|feeling] - 希望之墙\n/spark 编号 - 查看帖子和回复\n/encourage [平静|一般|焦虑|崩溃] - AI 鼓励\n/speak [文字] - 语音播报\n/reset - 恢复演示数据\n/status - 查看状态\n\n消息格式：\n#债务 南京银行 #总额 50000元 #已还 35000元 #银行\n（编辑时加 #编号 d1，类型可选 #银行 #网贷 #个人）\n#删除债务 d1\n#还款 招商银行信用卡 2000元\n#故事 内容 或 #心情 内容\n#回复 帖子编号 内容";

pub fn debt_line(debt: &DebtRecord) -> String {
    let mut line = format!(
        "[{}] {}（{}）份额 {}% | 剩余 {} | 已还 {} / 总计 {}（已清 {}%）",
        debt.id,
        debt.name,
        debt.category.label(),
        debt.percentage,
        Formatter::format_yuan(debt.remaining),
        Formatter::format_yuan(debt.paid),
        Formatter::format_yuan(debt.total),
        debt.cleared_percentage()
    );
    if debt.is_overpaid() {
        line.push_str(" ✅");
    }
    line
}

/// 债务结构分析
pub fn render_ledger(ledger: &DebtLedger) -> String {
    if ledger.is_empty() {
        return "📭 暂无债务记录。发送 #债务 名称 #总额 金额 开始记录。".to_string();
    }

    let totals = ledger.totals();
    let mut lines = vec![
        "📊 债务结构分析".to_string(),
        format!("总债务 {}", Formatter::format_yuan(totals.total_debt)),
        format!("已还 {}", Formatter::format_yuan(totals.total_paid)),
        format!("待还 {}", Formatter::format_yuan(totals.total_remaining)),
        format!("还款进度 {}%", ledger.progress()),
        String::new(),
    ];

    lines.extend(ledger.records().iter().map(debt_line));

    if let Some(top) = ledger.largest() {
        lines.push(String::new());
        lines.push(format!(
            "💡 您的最高债务项是“{}”，占总债务的 {}%。建议优先制定针对性还款计划。",
            top.name,
            ledger.records().iter().map(|d| d.percentage).max().unwrap_or(0)
        ));
    }

    lines.join("\n")
}

pub fn victory_line(victory: &Victory, now: DateTime<Utc>) -> String {
    let when = victory
        .recorded_at
        .map(|at| Formatter::relative_time(at, now))
        .unwrap_or_default();

    format!(
        "{} {} {} {} {}",
        victory.kind.icon(),
        victory.title,
        victory.amount,
        when,
        victory.status
    )
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn render_victories(log: &RepaymentLog, now: DateTime<Utc>) -> String {
    if log.is_empty() {
        return "🏁 还没有还款记录，发送 #还款 机构 金额 记录第一笔。".to_string();
    }

    let mut lines = vec!["🎉 还款胜利".to_string()];
    lines.extend(log.entries().iter().map(|v| victory_line(v, now)));
    lines.join("\n")
}

pub fn spark_card(spark: &Spark, now: DateTime<Utc>) -> String {
    format!(
        "{} #{} · {}\n{}\n❤️ {}  💬 {}",
        spark.tone.marker(),
        spark.id,
        Formatter::relative_time(spark.posted_at, now),
        spark.content,
        spark.likes,
        spark.replies.len()
    )
}

/// 希望之墙某一栏
pub fn render_wall(wall: &Wall, category: SparkCategory, now: DateTime<Utc>) -> String {
    let sparks = wall.by_category(category);
    if sparks.is_empty() {
        return format!("🌱 {}栏还没有内容，发送 #{} 内容 来写第一条。", category.label(), category.label());
    }

    let mut cards = vec![format!("🕯 希望之墙 · {}", category.label())];
    cards.extend(sparks.into_iter().map(|s| spark_card(s, now)));
    cards.join("\n\n")
}

pub fn render_spark_detail(spark: &Spark, now: DateTime<Utc>) -> String {
    let mut lines = vec![spark_card(spark, now)];
    if spark.replies.is_empty() {
        lines.push("暂无回复，发送 #回复 编号 内容 送上温暖。".to_string());
    } else {
        lines.push("回复：".to_string());
        lines.extend(spark.replies.iter().map(|r| format!("· {r}")));
    }
    lines.join("\n")
}

/// 将用户输入错误翻译为回复文本
pub fn user_message(error: &DebtBreakerError) -> String {
    match error {
        DebtBreakerError::EmptyContent { field } => match field.as_str() {
            "title" => "请填写还款机构名称。".to_string(),
            "amount" => "请填写有效的还款金额。".to_string(),
            _ => "内容不能为空。".to_string(),
        },
        DebtBreakerError::DebtNotFound { id } => format!("找不到编号为 {id} 的债务。"),
        DebtBreakerError::SparkNotFound { id } => format!("找不到编号为 {id} 的帖子。"),
        DebtBreakerError::InvalidCategory { tag } => format!("不支持的债务类型：{tag}"),
        DebtBreakerError::InvalidCommand { message } => format!("无法识别的参数：{message}"),
        _ => "❌ 处理消息时发生错误，请稍后重试。".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::models::{DebtCategory, DebtDraft, DebtId};
    use crate::session::Session;

    #[test]
    fn test_render_seeded_ledger() {
        let session = Session::seeded();
        let text = render_ledger(&session.ledger);
        assert!(text.contains("总债务 ¥100,000"));
        assert!(text.contains("还款进度 65%"));
        assert!(text.contains("[d1] 南京银行（银行）份额 50% | 剩余 ¥15,000"));
        assert!(text.contains("最高债务项是“南京银行”，占总债务的 50%"));
    }

    #[test]
    fn test_debt_line_shows_repayment_detail() {
        let session = Session::seeded();
        let line = debt_line(&session.ledger.records()[1]);
        assert_eq!(
            line,
            "[d2] 招商银行信用卡（银行）份额 30% | 剩余 ¥10,000 | 已还 ¥20,000 / 总计 ¥30,000（已清 67%）"
        );

        let zero = DebtRecord::from_draft(
            DebtDraft::new("空账户", "0", "0", DebtCategory::Personal).with_id(DebtId::from("z1")),
        );
        assert_eq!(
            debt_line(&zero),
            "[z1] 空账户（个人）份额 0% | 剩余 ¥0 | 已还 ¥0 / 总计 ¥0（已清 0%）"
        );
    }

    #[test]
    fn test_render_empty_views() {
        let session = Session::empty();
        let now = Utc::now();
        assert!(render_ledger(&session.ledger).starts_with("📭"));
        assert!(render_victories(&session.victories, now).starts_with("🏁"));
        assert!(render_wall(&session.wall, SparkCategory::Feeling, now).contains("心情"));
    }

    #[test]
    fn test_milestone_without_date() {
        let session = Session::seeded();
        let text = render_victories(&session.victories, Utc::now());
        assert!(text.contains("🏆 达成里程碑 50% 债务缩减 成就"));
        assert!(text.contains("💳 信用卡 A ¥2,000 昨天 已完成"));
    }

    #[test]
    fn test_user_message() {
        let msg = user_message(&DebtBreakerError::spark_not_found("42"));
        assert_eq!(msg, "找不到编号为 42 的帖子。");
    }
}
