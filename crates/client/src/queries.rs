//! GraphQL documents for the read-only queries the client exposes.
//!
//! Field selections follow what the Monarch Money web client requests; the
//! responses are handed back to callers untouched, so anything selected
//! here is visible downstream.

pub(crate) const GET_ACCOUNTS: &str = r#"
query GetAccounts {
  accounts {
    id
    displayName
    currentBalance
    displayBalance
    includeInNetWorth
    isAsset
    isManual
    isHidden
    mask
    createdAt
    updatedAt
    displayLastUpdatedAt
    syncDisabled
    deactivatedAt
    dataProvider
    transactionsCount
    holdingsCount
    order
    type { name display __typename }
    subtype { name display __typename }
    credential { id updateRequired dataProvider __typename }
    institution { id name logo url __typename }
    __typename
  }
}"#;

pub(crate) const GET_ACCOUNT_TYPE_OPTIONS: &str = r#"
query GetAccountTypeOptions {
  accountTypeOptions {
    type { name display group possibleSubtypes { display name __typename } __typename }
    __typename
  }
}"#;

pub(crate) const GET_ACCOUNT_HISTORY: &str = r#"
query AccountDetails_getAccount($id: UUID!) {
  account(id: $id) {
    id
    __typename
  }
  accountHistory: accountBalanceHistory(accountId: $id) {
    date
    signedBalance
    accountId
    __typename
  }
}"#;

pub(crate) const GET_ACCOUNT_HOLDINGS: &str = r#"
query Web_GetHoldings($input: PortfolioInput) {
  portfolio(input: $input) {
    aggregateHoldings {
      edges {
        node {
          id
          quantity
          basis
          totalValue
          securityPriceChangeDollars
          securityPriceChangePercent
          lastSyncedAt
          holdings {
            id
            type
            typeDisplay
            name
            ticker
            closingPrice
            closingPriceUpdatedAt
            quantity
            value
            account { id displayName __typename }
            __typename
          }
          security {
            id
            name
            ticker
            currentPrice
            currentPriceUpdatedAt
            type
            typeDisplay
            __typename
          }
          __typename
        }
        __typename
      }
      __typename
    }
    __typename
  }
}"#;

pub(crate) const GET_INSTITUTIONS: &str = r#"
query Web_GetInstitutionSettings {
  credentials {
    id
    updateRequired
    disconnectedFromDataProviderAt
    dataProvider
    institution {
      id
      name
      url
      logo
      status
      newConnectionsDisabled
      __typename
    }
    __typename
  }
}"#;

pub(crate) const GET_TRANSACTIONS: &str = r#"
query GetTransactionsList($offset: Int, $limit: Int, $filters: TransactionFilterInput, $orderBy: TransactionOrdering) {
  allTransactions(filters: $filters) {
    totalCount
    results(offset: $offset, limit: $limit, orderBy: $orderBy) {
      id
      amount
      pending
      date
      hideFromReports
      plaidName
      notes
      isRecurring
      reviewStatus
      needsReview
      dataProviderDescription
      attachments { id __typename }
      isSplitTransaction
      category { id name __typename }
      merchant { name id transactionsCount __typename }
      account { id displayName __typename }
      tags { id name color order __typename }
      __typename
    }
    __typename
  }
  transactionRules { id __typename }
}"#;

pub(crate) const GET_TRANSACTIONS_SUMMARY: &str = r#"
query GetTransactionsPage {
  aggregates(fillEmptyValues: true) {
    summary {
      avg
      count
      max
      maxExpense
      sum
      sumIncome
      sumExpense
      first
      last
      __typename
    }
    __typename
  }
}"#;

pub(crate) const GET_TRANSACTION_CATEGORIES: &str = r#"
query GetCategories {
  categories {
    id
    order
    name
    icon
    systemCategory
    isSystemCategory
    isDisabled
    group { id name type __typename }
    __typename
  }
}"#;

pub(crate) const GET_TRANSACTION_CATEGORY_GROUPS: &str = r#"
query ManageGetCategoryGroups {
  categoryGroups {
    id
    name
    order
    type
    updatedAt
    createdAt
    __typename
  }
}"#;

pub(crate) const GET_BUDGETS: &str = r#"
query GetJointPlanningData($startDate: Date!, $endDate: Date!) {
  budgetData(startMonth: $startDate, endMonth: $endDate) {
    monthlyAmountsByCategory {
      category { id __typename }
      monthlyAmounts {
        month
        plannedCashFlowAmount
        plannedSetAsideAmount
        actualAmount
        remainingAmount
        previousMonthRolloverAmount
        rolloverType
        __typename
      }
      __typename
    }
    totalsByMonth {
      month
      totalIncome { plannedAmount actualAmount remainingAmount __typename }
      totalExpenses { plannedAmount actualAmount remainingAmount __typename }
      totalFixedExpenses { plannedAmount actualAmount remainingAmount __typename }
      totalNonMonthlyExpenses { plannedAmount actualAmount remainingAmount __typename }
      totalFlexibleExpenses { plannedAmount actualAmount remainingAmount __typename }
      __typename
    }
    __typename
  }
  categoryGroups {
    id
    name
    order
    groupLevelBudgetingEnabled
    budgetVariability
    rolloverPeriod { id startMonth endMonth __typename }
    categories { id name order icon __typename }
    type
    __typename
  }
  goalsV2 {
    id
    name
    archivedAt
    completedAt
    priority
    imageStorageProvider
    imageStorageProviderId
    plannedContributions(startMonth: $startDate, endMonth: $endDate) {
      id
      month
      amount
      __typename
    }
    monthlyContributionSummaries(startMonth: $startDate, endMonth: $endDate) {
      month
      sum
      __typename
    }
    __typename
  }
}"#;

pub(crate) const GET_RECURRING_TRANSACTIONS: &str = r#"
query Web_GetUpcomingRecurringTransactionItems($startDate: Date!, $endDate: Date!, $filters: RecurringTransactionFilter) {
  recurringTransactionItems(startDate: $startDate, endDate: $endDate, filters: $filters) {
    stream {
      id
      frequency
      amount
      isApproximate
      merchant { id name logoUrl __typename }
      __typename
    }
    date
    isPast
    transactionId
    amount
    amountDiff
    category { id name __typename }
    account { id displayName __typename }
    __typename
  }
}"#;

pub(crate) const GET_CASHFLOW: &str = r#"
query Web_GetCashFlowPage($filters: TransactionFilterInput) {
  byCategory: aggregates(filters: $filters, groupBy: ["category"]) {
    groupBy { category { id name icon group { id type __typename } __typename } __typename }
    summary { sum __typename }
    __typename
  }
  byCategoryGroup: aggregates(filters: $filters, groupBy: ["categoryGroup"]) {
    groupBy { categoryGroup { id name type __typename } __typename }
    summary { sum __typename }
    __typename
  }
  byMerchant: aggregates(filters: $filters, groupBy: ["merchant"]) {
    groupBy { merchant { id name logoUrl __typename } __typename }
    summary { sumIncome sumExpense __typename }
    __typename
  }
  summary: aggregates(filters: $filters, fillEmptyValues: true) {
    summary { sumIncome sumExpense savings savingsRate __typename }
    __typename
  }
}"#;

pub(crate) const GET_CASHFLOW_SUMMARY: &str = r#"
query Web_GetCashFlowSummary($filters: TransactionFilterInput) {
  summary: aggregates(filters: $filters, fillEmptyValues: true) {
    summary { sumIncome sumExpense savings savingsRate __typename }
    __typename
  }
}"#;
