//! Training examples and the bundled default corpus.

use serde::{Deserialize, Serialize};

use super::label::SentimentLabel;

/// A labeled text used for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: SentimentLabel,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: SentimentLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

const POSITIVE_REVIEWS: &[&str] = &[
    "Отличный товар, очень доволен покупкой",
    "Прекрасное качество, всем рекомендую",
    "Замечательный сервис, спасибо большое",
    "Очень понравилось, буду заказывать еще",
    "Доставка быстрая, товар отличный, доволен",
    "Великолепно, превзошло все ожидания",
    "Супер, лучшая покупка за год",
    "Классный магазин, вежливые продавцы, рекомендую",
    "Люблю этот бренд, качество на высоте",
    "Все отлично, упаковка целая, доволен",
    "Превосходный вкус, обязательно куплю снова",
    "Хороший товар за свои деньги, рекомендую",
    "Приятно удивлен качеством, спасибо",
    "Идеально подошло, очень удобно",
    "Восхитительный аромат, муж в восторге",
    "Быстро, качественно, надежно, доволен на все сто",
    "Отличное обслуживание, приятный персонал",
    "Работает прекрасно, советую всем друзьям",
    "Лучший сервис в городе, рекомендую",
    "Качество отличное, цена приятная, спасибо",
];

const NEGATIVE_REVIEWS: &[&str] = &[
    "Ужасное качество, деньги на ветер",
    "Плохой сервис, больше не приду",
    "Товар пришел сломанный, очень разочарован",
    "Отвратительное обслуживание, грубый персонал",
    "Кошмар, заказ потеряли и не извинились",
    "Худшая покупка в моей жизни",
    "Сломалось через неделю, разочарован",
    "Доставка задержалась на месяц, возмущен",
    "Не работает, возврат денег так и не сделали",
    "Полный провал, никому не советую",
    "Ненавижу этот магазин, постоянный обман",
    "Ткань рвется сразу, качество ужасное",
    "Грязно, шумно и дорого, не приду снова",
    "Обман покупателей, товар не соответствует фото",
    "Запах ужасный, пришлось выбросить",
    "Продавец хамит, деньги не вернули",
    "Сломанный экран из коробки, разочарован",
    "Очень плохо упаковано, все разбилось",
    "Отвратительный вкус, есть невозможно",
    "Ожидание час, еда холодная, ужасно",
];

const NEUTRAL_REVIEWS: &[&str] = &[
    "Обычный товар, ничего особенного",
    "Соответствует описанию, без сюрпризов",
    "Доставили в срок, пока не пользовался",
    "Нормально, за эти деньги сойдет",
    "Товар как на фото, размер подошел",
    "Средне, есть варианты и получше",
    "Заказ получил, посмотрим как будет работать",
    "Цена обычная, качество среднее",
    "Пришло в стандартной упаковке",
    "Пользуюсь второй день, пока без замечаний",
    "Ничего особенного, обычный магазин",
    "Курьер приехал в указанное время",
    "Цвет немного отличается от фото, в целом нормально",
    "Инструкция на английском языке",
    "Забрал заказ в пункте выдачи",
    "Размер стандартный, вес средний",
    "Вполне обычный сервис, средний уровень",
    "Заказ оформлен, доставка через три дня",
    "Товар в наличии, есть разные цвета",
    "Среднее качество, средняя цена",
];

/// The bundled corpus used when no examples are supplied.
pub fn default_corpus() -> Vec<TrainingExample> {
    let labeled = [
        (POSITIVE_REVIEWS, SentimentLabel::Positive),
        (NEGATIVE_REVIEWS, SentimentLabel::Negative),
        (NEUTRAL_REVIEWS, SentimentLabel::Neutral),
    ];

    labeled
        .iter()
        .flat_map(|(texts, label)| texts.iter().map(move |t| TrainingExample::new(*t, *label)))
        .collect()
}

/// Default corpus followed by the supplied examples.
pub fn extended_corpus(additional: &[TrainingExample]) -> Vec<TrainingExample> {
    let mut corpus = default_corpus();
    corpus.extend_from_slice(additional);
    corpus
}
