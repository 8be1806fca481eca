pub const REMEDIES: [&str; 3] = [
    "条款 1：选出一个核心术语，为其写一句排他定义（包含“不是什么”）。验收：他人能举出一个反例。",
    "条款 2：写出适用边界（至少一个“不适用场景”）。验收：边界句不含抽象词。",
    "条款 3：给出失败条件（何时算不成立）。验收：失败条件可被复述且不引入新概念。",
];

pub fn generate_remedies() -> Vec<String> {
    REMEDIES.iter().map(|r| r.to_string()).collect()
}
